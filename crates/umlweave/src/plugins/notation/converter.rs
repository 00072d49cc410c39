//! Notation to model conversion

use tracing::{debug, trace};

use super::chumsky_parser::{NotationParser, ParsedRelationship, Statement};
use crate::core::{Class, ClassKind, FragmentError, Model, Multiplicity};

/// Map a notation cardinality onto a multiplicity
///
/// Accepts the canonical codes and the usual shorthands (`1`, `*`, `1..n`,
/// `0..n`).
pub fn parse_cardinality(raw: &str) -> Result<Multiplicity, FragmentError> {
    match raw.trim() {
        "0..1" => Ok(Multiplicity::ZeroOrOne),
        "1" | "1..1" => Ok(Multiplicity::ExactlyOne),
        "*" | "0..*" | "0..n" => Ok(Multiplicity::ZeroOrMore),
        "1..*" | "1..n" => Ok(Multiplicity::OneOrMore),
        other => Err(FragmentError::invalid_multiplicity(other)),
    }
}

/// Converts notation text into a [`Model`]
#[derive(Default)]
pub struct NotationConverter {
    parser: NotationParser,
}

impl NotationConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `input` and build the model it describes, named `name`
    pub fn convert(&self, name: &str, input: &str) -> Result<Model, FragmentError> {
        let statements = self.parser.parse_diagram(input)?;
        let mut model = Model::new(name);

        for statement in statements {
            match statement {
                Statement::Class(class) => {
                    trace!(class = %class.name, "Declared class");
                    ensure_class(&mut model, &class.name);
                }
                Statement::Relationship(relationship) => {
                    add_relationship(&mut model, &relationship)?;
                }
            }
        }

        debug!(
            model = name,
            classes = model.class_count(),
            associations = model.association_count(),
            "Converted notation"
        );
        Ok(model)
    }
}

fn ensure_class(model: &mut Model, name: &str) {
    model.insert_class(Class::new(name, ClassKind::Class));
}

fn add_relationship(model: &mut Model, relationship: &ParsedRelationship) -> Result<(), FragmentError> {
    ensure_class(model, &relationship.from);
    ensure_class(model, &relationship.to);

    if !relationship.arrow.is_association() {
        trace!(
            from = %relationship.from,
            to = %relationship.to,
            arrow = ?relationship.arrow,
            "Skipping non-association arrow"
        );
        return Ok(());
    }

    let cardinality = relationship.to_cardinality.as_deref().ok_or_else(|| {
        FragmentError::notation_error(format!(
            "association {} -> {} has no target cardinality",
            relationship.from, relationship.to
        ))
    })?;
    let multiplicity = parse_cardinality(cardinality)?;

    if let Some(source) = model.class_mut(&relationship.from) {
        source.associate(&relationship.to, multiplicity);
    }
    Ok(())
}

/// Convert notation text into a model named `name`
pub fn model_from_notation(name: &str, input: &str) -> Result<Model, FragmentError> {
    NotationConverter::new().convert(name, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinalities() {
        assert_eq!(parse_cardinality("0..1").unwrap(), Multiplicity::ZeroOrOne);
        assert_eq!(parse_cardinality("1").unwrap(), Multiplicity::ExactlyOne);
        assert_eq!(parse_cardinality("1..1").unwrap(), Multiplicity::ExactlyOne);
        assert_eq!(parse_cardinality("*").unwrap(), Multiplicity::ZeroOrMore);
        assert_eq!(parse_cardinality("0..*").unwrap(), Multiplicity::ZeroOrMore);
        assert_eq!(parse_cardinality("0..n").unwrap(), Multiplicity::ZeroOrMore);
        assert_eq!(parse_cardinality("1..*").unwrap(), Multiplicity::OneOrMore);
        assert_eq!(parse_cardinality("1..n").unwrap(), Multiplicity::OneOrMore);
        assert!(matches!(
            parse_cardinality("2..4"),
            Err(FragmentError::InvalidMultiplicity { .. })
        ));
    }

    #[test]
    fn test_convert_garage() {
        let input = "\
classDiagram
    class Car
    class Engine
    Car --> \"1..1\" Engine
    Car *-- \"1..*\" Wheels
    Vehicle <|-- Car
";
        let model = model_from_notation("Garage", input).unwrap();
        assert_eq!(model.name(), "Garage");
        assert_eq!(
            model.class_names().into_iter().collect::<Vec<_>>(),
            vec!["Car", "Engine", "Vehicle", "Wheels"]
        );
        let car = model.class("Car").unwrap();
        assert_eq!(car.associations().len(), 2);
        assert!(car
            .association_set()
            .contains(&("Car", "Wheels", Multiplicity::OneOrMore)));
        assert!(model.class("Vehicle").unwrap().associations().is_empty());
    }

    #[test]
    fn test_association_needs_cardinality() {
        let result = model_from_notation("Garage", "Car --> Engine");
        assert!(matches!(result, Err(FragmentError::Notation { .. })));
    }

    #[test]
    fn test_unknown_cardinality_rejected() {
        let result = model_from_notation("Garage", "Car --> \"several\" Engine");
        assert!(matches!(result, Err(FragmentError::InvalidMultiplicity { .. })));
    }
}
