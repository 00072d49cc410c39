//! Pipeline orchestrator for turning documents into models
//!
//! The pipeline manages the flow of one document through every stage:
//! Coreference → Classifier → Extractor → Keying → Assembly

use anyhow::{Context, Result};
use tracing::{debug, info, span, trace, warn, Level};

use super::{ClassSentenceDetector, LexicalParser, RelationshipSentenceDetector};
use crate::assembly::assemble;
use crate::core::{
    CoreferenceResolver, DependencyParser, Detector, Fragment, FragmentError, FragmentKey, Model,
    SentenceClassifier, SentenceKind, SentenceSplitter,
};
use crate::extraction::Extractor;

/// Classifier that picks the most confident registered detector
///
/// Ties go to the detector registered first.
#[derive(Default)]
pub struct DetectorClassifier {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorClassifier {
    /// Create a classifier with no detectors
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with the class and relationship detectors
    pub fn with_builtin_detectors() -> Self {
        let mut classifier = Self::new();
        classifier.register(Box::new(ClassSentenceDetector::new()));
        classifier.register(Box::new(RelationshipSentenceDetector::new()));
        classifier
    }

    /// Register a detector plugin
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Kinds of the registered detectors, in registration order
    pub fn kinds(&self) -> Vec<SentenceKind> {
        self.detectors.iter().map(|d| d.sentence_kind()).collect()
    }
}

impl SentenceClassifier for DetectorClassifier {
    fn predict(&self, sentence: &str) -> Result<String> {
        let mut best: Option<(SentenceKind, f64)> = None;
        for detector in &self.detectors {
            let confidence = detector.confidence(sentence);
            trace!(kind = %detector.sentence_kind(), confidence, "Checking detector");
            if best.map_or(true, |(_, top)| confidence > top) {
                best = Some((detector.sentence_kind(), confidence));
            }
        }

        let (kind, confidence) = best.ok_or_else(|| anyhow::anyhow!("No detectors registered"))?;
        debug!(%kind, confidence, "Classified sentence");
        Ok(kind.label().to_string())
    }
}

/// Pipeline behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Fail on a relationship sentence without a multiplicity phrase instead
    /// of skipping it
    pub strict: bool,
}

/// Document pipeline that coordinates the collaborators
pub struct Pipeline {
    extractor: Extractor,
    classifier: Box<dyn SentenceClassifier>,
    resolver: Box<dyn CoreferenceResolver>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        extractor: Extractor,
        classifier: Box<dyn SentenceClassifier>,
        resolver: Box<dyn CoreferenceResolver>,
    ) -> Self {
        Self {
            extractor,
            classifier,
            resolver,
            config: PipelineConfig::default(),
        }
    }

    /// Built-in patterns and detectors, the identity resolver, and `parser`
    pub fn with_parser(parser: Box<dyn DependencyParser>) -> Result<Self, FragmentError> {
        Ok(Self::new(
            Extractor::with_builtin_patterns(parser)?,
            Box::new(DetectorClassifier::with_builtin_detectors()),
            Box::new(SentenceSplitter::new()),
        ))
    }

    /// [`Pipeline::with_parser`] using the [`LexicalParser`]
    pub fn with_lexical_parser() -> Result<Self, FragmentError> {
        Self::with_parser(Box::new(LexicalParser::new()))
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Extract keyed fragments from every sentence of a document
    ///
    /// Keys are `<document>_<kind><sentence index>`. Sentences that match no
    /// pattern produce nothing.
    pub fn extract_document(&self, document: &str, text: &str) -> Result<Vec<(FragmentKey, Fragment)>> {
        let doc_span = span!(Level::INFO, "extract_document", document, text_len = text.len());
        let _enter = doc_span.enter();

        let sentences = self
            .resolver
            .resolve(text)
            .with_context(|| format!("Coreference resolution failed for {}", document))?;
        debug!(sentences = sentences.len(), "Resolved sentences");

        let mut fragments = Vec::new();
        for (index, sentence) in &sentences {
            let label = self
                .classifier
                .predict(sentence)
                .with_context(|| format!("Classification failed for sentence {}", index))?;

            match self.extractor.extract_as(sentence, &label) {
                Ok(Some(fragment)) => {
                    let kind: SentenceKind = label.parse()?;
                    let key = FragmentKey::new(document, kind, *index);
                    trace!(%key, "Keyed fragment");
                    fragments.push((key, fragment));
                }
                Ok(None) => debug!(index, sentence = %sentence, "No pattern matched"),
                Err(FragmentError::NoMultiplicityFound { .. }) if !self.config.strict => {
                    warn!(index, sentence = %sentence, "Skipping relationship without multiplicity");
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("Extraction failed for sentence {}: {}", index, sentence)))
                }
            }
        }

        info!(document, fragments = fragments.len(), "Extracted document");
        Ok(fragments)
    }

    /// Extract and assemble one document into its model
    ///
    /// The model is named after the document.
    pub fn process_document(&self, document: &str, text: &str) -> Result<Model> {
        let process_span = span!(Level::INFO, "process_document", document);
        let _enter = process_span.enter();

        let fragments = self.extract_document(document, text)?;
        let mut model = assemble(fragments.iter().map(|(_, fragment)| fragment));
        model.set_name(document);
        info!(
            document,
            classes = model.class_count(),
            associations = model.association_count(),
            "Processed document"
        );
        Ok(model)
    }
}
