//! Property tests for model equality and assembly

use proptest::prelude::*;
use umlweave::extraction::{multiplicity_for_phrase, MULTIPLICITY_PHRASES};
use umlweave::prelude::*;

const NAMES: [&str; 6] = ["Car", "wheels", "ENGINE", "Door", "garage", "Driver"];

fn name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NAMES.to_vec())
}

fn multiplicity() -> impl Strategy<Value = Multiplicity> {
    prop::sample::select(Multiplicity::ALL.to_vec())
}

/// Class fragments followed by relationship fragments
fn fragments() -> impl Strategy<Value = Vec<Fragment>> {
    (
        prop::collection::vec(name(), 0..5),
        prop::collection::vec((name(), name(), multiplicity()), 0..8),
    )
        .prop_map(|(classes, relationships)| {
            let mut fragments: Vec<Fragment> = classes.into_iter().map(Fragment::class).collect();
            fragments.extend(
                relationships
                    .into_iter()
                    .map(|(source, destination, m)| Fragment::relationship(source, destination, m)),
            );
            fragments
        })
}

fn shuffled_fragments() -> impl Strategy<Value = (Vec<Fragment>, Vec<Fragment>)> {
    fragments().prop_flat_map(|fragments| {
        let original = fragments.clone();
        Just(fragments)
            .prop_shuffle()
            .prop_map(move |shuffled| (original.clone(), shuffled))
    })
}

proptest! {
    #[test]
    fn equality_ignores_fragment_order((original, shuffled) in shuffled_fragments()) {
        prop_assert_eq!(assemble(&original), assemble(&shuffled));
    }

    #[test]
    fn equality_ignores_class_and_association_order((original, _) in shuffled_fragments()) {
        let model = assemble(&original);
        let mut classes: Vec<Class> = model.classes().to_vec();
        classes.reverse();
        let reordered = Model::from_classes("Reordered", classes.into_iter().map(|class| {
            let mut reversed = Class::new(class.name(), class.kind());
            for association in class.associations().iter().rev() {
                reversed.associate(association.destination(), association.multiplicity());
            }
            reversed
        }));
        prop_assert_eq!(&model, &reordered);
        prop_assert!(ModelComparison::between(&model, &reordered).is_match());
    }

    #[test]
    fn decomposed_model_reassembles_to_itself(fragments in fragments()) {
        let model = assemble(&fragments);
        let reassembled = assemble(&Fragment::decompose(&model));
        prop_assert_eq!(&reassembled, &model);
        prop_assert_eq!(reassembled.class_count(), model.class_count());
    }

    #[test]
    fn duplicated_fragments_keep_the_class_set(fragments in fragments()) {
        let once = assemble(&fragments);
        let doubled: Vec<Fragment> = fragments.iter().chain(fragments.iter()).cloned().collect();
        let twice = assemble(&doubled);
        prop_assert_eq!(once.class_names(), twice.class_names());
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn assembled_models_have_unique_classes(fragments in fragments()) {
        let model = assemble(&fragments);
        prop_assert_eq!(model.class_names().len(), model.class_count());
        prop_assert_eq!(model.is_empty(), fragments.is_empty());
    }

    #[test]
    fn phrase_mapping_is_case_insensitive(index in 0..MULTIPLICITY_PHRASES.len(), upper in any::<bool>()) {
        let (phrase, expected) = MULTIPLICITY_PHRASES[index];
        let variant = if upper { phrase.to_uppercase() } else { phrase.to_string() };
        prop_assert_eq!(multiplicity_for_phrase(&variant), Some(expected));
        prop_assert_eq!(multiplicity_for_phrase(&variant), multiplicity_for_phrase(phrase));
    }
}
