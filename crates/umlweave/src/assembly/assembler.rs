//! Arena-based fragment assembler
//!
//! Classes live in an arena addressed by [`ClassId`]; an interner maps each
//! canonical name to its slot. Associations always attach to the arena node,
//! never to the copy carried by the fragment.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{canonical_name, Association, Class, ClassKind, Fragment, Model, Multiplicity};

/// Index of a class in the assembler's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl ClassId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Counters collected while assembling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub fragments: usize,
    pub classes: usize,
    pub associations: usize,
    /// Associations whose (source, destination, multiplicity) triple was
    /// already present; they are kept, not merged
    pub duplicate_associations: usize,
}

/// Incremental fragment assembler
#[derive(Debug, Default)]
pub struct Assembler {
    arena: Vec<Class>,
    interner: HashMap<String, ClassId>,
    seen: HashSet<(String, String, Multiplicity)>,
    stats: AssemblyStats,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a class by name, inserting it with `kind` if unseen
    ///
    /// An existing node wins: its kind tag is kept.
    pub fn intern(&mut self, name: &str, kind: ClassKind) -> ClassId {
        let name = canonical_name(name);
        if let Some(&id) = self.interner.get(&name) {
            return id;
        }
        let id = ClassId(self.arena.len());
        trace!(class = %name, %kind, "Interning class");
        self.arena.push(Class::new(&name, kind));
        self.interner.insert(name, id);
        self.stats.classes += 1;
        id
    }

    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.interner.get(&canonical_name(name)).copied()
    }

    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.arena.get(id.0)
    }

    /// Merge one fragment into the arena
    pub fn add_fragment(&mut self, fragment: &Fragment) {
        self.stats.fragments += 1;

        for class in fragment.classes() {
            self.intern(class.name(), class.kind());
        }

        for class in fragment.classes() {
            let source = self.intern(class.name(), class.kind());
            for association in class.associations() {
                self.attach(source, association);
            }
        }
    }

    fn attach(&mut self, source: ClassId, association: &Association) {
        // Destinations that no fragment introduced become relationship endpoints
        self.intern(association.destination(), ClassKind::Rel);

        let Some(node) = self.arena.get_mut(source.0) else {
            return;
        };
        let triple = (
            node.name().to_string(),
            association.destination().to_string(),
            association.multiplicity(),
        );
        if !self.seen.insert(triple) {
            self.stats.duplicate_associations += 1;
            warn!(
                association = %association,
                "Duplicate association kept"
            );
        }
        node.associate(association.destination(), association.multiplicity());
        self.stats.associations += 1;
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// The assembled model, named after the first class inserted
    pub fn finish(self) -> Model {
        let name = self
            .arena
            .first()
            .map(|c| c.name().to_string())
            .unwrap_or_default();
        debug!(
            model = %name,
            fragments = self.stats.fragments,
            classes = self.stats.classes,
            associations = self.stats.associations,
            duplicates = self.stats.duplicate_associations,
            "Assembly finished"
        );
        Model::from_classes(&name, self.arena)
    }
}

/// Assemble fragments into one model
///
/// Never fails; an empty input yields an empty model.
pub fn assemble<'a>(fragments: impl IntoIterator<Item = &'a Fragment>) -> Model {
    let assemble_span = span!(Level::INFO, "assemble");
    let _enter = assemble_span.enter();

    let mut assembler = Assembler::new();
    for fragment in fragments {
        assembler.add_fragment(fragment);
    }
    let stats = assembler.stats();
    info!(
        fragments = stats.fragments,
        classes = stats.classes,
        associations = stats.associations,
        "Assembled model"
    );
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let model = assemble(&Vec::<Fragment>::new());
        assert!(model.is_empty());
        assert_eq!(model.name(), "");
    }

    #[test]
    fn test_existing_class_keeps_kind() {
        let fragments = [
            Fragment::class("Car"),
            Fragment::relationship("Car", "Wheels", Multiplicity::OneOrMore),
        ];
        let model = assemble(&fragments);
        assert_eq!(model.name(), "Car");
        assert_eq!(model.class("Car").unwrap().kind(), ClassKind::Class);
        assert_eq!(model.class("Wheels").unwrap().kind(), ClassKind::Rel);
        assert_eq!(model.class("Car").unwrap().associations().len(), 1);
    }

    #[test]
    fn test_associations_attach_to_arena_node() {
        let mut assembler = Assembler::new();
        assembler.add_fragment(&Fragment::class("Car"));
        assembler.add_fragment(&Fragment::relationship("Car", "Engine", Multiplicity::ExactlyOne));
        assembler.add_fragment(&Fragment::relationship("Car", "Wheels", Multiplicity::OneOrMore));

        let car = assembler.lookup("car").unwrap();
        assert_eq!(car.index(), 0);
        assert_eq!(assembler.class(car).unwrap().associations().len(), 2);
        assert_eq!(assembler.stats().classes, 3);
    }

    #[test]
    fn test_unknown_destination_materialized() {
        let fragment = Fragment::single(
            Class::new("Car", ClassKind::Class).with_association("Door", Multiplicity::ZeroOrMore),
        );
        assert_eq!(fragment.classes().len(), 1);
        let model = assemble([&fragment]);
        assert_eq!(model.class("Door").unwrap().kind(), ClassKind::Rel);
    }

    #[test]
    fn test_duplicates_are_counted_and_kept() {
        let fragment = Fragment::relationship("Car", "Wheels", Multiplicity::OneOrMore);
        let mut assembler = Assembler::new();
        assembler.add_fragment(&fragment);
        assembler.add_fragment(&fragment);
        assert_eq!(assembler.stats().duplicate_associations, 1);

        let model = assembler.finish();
        assert_eq!(model.association_count(), 2);
        assert_eq!(model, assemble([&fragment]));
    }
}
