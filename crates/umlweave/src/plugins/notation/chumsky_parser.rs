//! Class diagram notation parser using chumsky
//!
//! Parses the Mermaid-style notation ground-truth diagrams are written in:
//! class declarations and relationship lines with optional cardinalities.

use chumsky::prelude::*;
use chumsky::text::ident;

use crate::core::chumsky_utils::{
    inline_whitespace, inline_whitespace_required, optional_separator, separator,
};
use crate::core::FragmentError;

/// Relationship arrows, as written between the two class names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Inheritance, // <|--
    Realization, // ..|>
    Composition, // *--
    Aggregation, // o--
    Dependency,  // ..>
    Association, // -->
    DashedLink,  // ..
    Link,        // --
}

impl Arrow {
    /// Whether the arrow denotes an association that carries a multiplicity
    pub fn is_association(&self) -> bool {
        matches!(
            self,
            Arrow::Association | Arrow::Link | Arrow::Composition | Arrow::Aggregation
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedClass {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRelationship {
    pub from: String,
    pub from_cardinality: Option<String>,
    pub arrow: Arrow,
    pub to_cardinality: Option<String>,
    pub to: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Class(ParsedClass),
    Relationship(ParsedRelationship),
}

/// Chumsky-based notation parser
pub struct NotationParser;

impl NotationParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a complete diagram
    pub fn parse_diagram(&self, input: &str) -> Result<Vec<Statement>, FragmentError> {
        Self::diagram_parser()
            .parse(input)
            .into_result()
            .map_err(|errors| FragmentError::notation_error(format!("Parse errors: {:?}", errors)))
    }

    /// Parse a single statement
    pub fn parse_statement(&self, input: &str) -> Result<Statement, FragmentError> {
        Self::statement_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .map_err(|errors| FragmentError::notation_error(format!("Parse errors: {:?}", errors)))
    }

    fn diagram_parser<'src>() -> impl Parser<'src, &'src str, Vec<Statement>> {
        let header = text::keyword("classDiagram")
            .or(text::keyword("classdiagram"))
            .or_not();

        optional_separator()
            .ignore_then(header)
            .then_ignore(optional_separator())
            .ignore_then(
                Self::statement_parser()
                    .separated_by(separator())
                    .allow_trailing()
                    .collect(),
            )
            .then_ignore(optional_separator())
            .then_ignore(end())
    }

    fn statement_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        Self::class_parser()
            .map(Statement::Class)
            .or(Self::relationship_parser().map(Statement::Relationship))
    }

    fn class_parser<'src>() -> impl Parser<'src, &'src str, ParsedClass> + Clone {
        let class_name = ident().map(|s: &str| s.to_string());

        // Members are not part of the model; the body is skipped whole
        let body = just('{')
            .then(none_of('}').repeated())
            .then(just('}'))
            .ignored();

        text::keyword("class")
            .then_ignore(inline_whitespace_required())
            .ignore_then(class_name)
            .then_ignore(inline_whitespace().then(body).or_not())
            .map(|name| ParsedClass { name })
    }

    fn relationship_parser<'src>() -> impl Parser<'src, &'src str, ParsedRelationship> + Clone {
        let class_name = ident().map(|s: &str| s.to_string());

        let cardinality = just('"')
            .ignore_then(none_of("\"\n").repeated().to_slice())
            .then_ignore(just('"'))
            .map(|s: &str| s.trim().to_string());

        // Longest first to avoid partial matches
        let arrow = just("<|--")
            .to(Arrow::Inheritance)
            .or(just("..|>").to(Arrow::Realization))
            .or(just("*--").to(Arrow::Composition))
            .or(just("o--").to(Arrow::Aggregation))
            .or(just("..>").to(Arrow::Dependency))
            .or(just("-->").to(Arrow::Association))
            .or(just("..").to(Arrow::DashedLink))
            .or(just("--").to(Arrow::Link));

        let label = just(':')
            .ignore_then(inline_whitespace())
            .ignore_then(none_of("\n\r").repeated().to_slice())
            .map(|s: &str| s.trim().to_string())
            .or_not();

        class_name
            .clone()
            .then_ignore(inline_whitespace())
            .then(cardinality.clone().or_not())
            .then_ignore(inline_whitespace())
            .then(arrow)
            .then_ignore(inline_whitespace())
            .then(cardinality.or_not())
            .then_ignore(inline_whitespace())
            .then(class_name)
            .then_ignore(inline_whitespace())
            .then(label)
            .map(
                |(((((from, from_cardinality), arrow), to_cardinality), to), label)| {
                    ParsedRelationship {
                        from,
                        from_cardinality,
                        arrow,
                        to_cardinality,
                        to,
                        label: label.filter(|s| !s.is_empty()),
                    }
                },
            )
    }
}

impl Default for NotationParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relationship(input: &str) -> ParsedRelationship {
        match NotationParser::new().parse_statement(input).unwrap() {
            Statement::Relationship(rel) => rel,
            other => panic!("Expected relationship statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_class() {
        let result = NotationParser::new().parse_statement("class Car").unwrap();
        assert_eq!(
            result,
            Statement::Class(ParsedClass {
                name: "Car".to_string()
            })
        );
    }

    #[test]
    fn test_parse_class_with_body() {
        let result = NotationParser::new()
            .parse_statement("class Car { +model: String }")
            .unwrap();
        assert!(matches!(result, Statement::Class(c) if c.name == "Car"));
    }

    #[test]
    fn test_parse_association_with_cardinalities() {
        let rel = relationship("Car \"1\" --> \"1..*\" Wheel : rolls on");
        assert_eq!(rel.from, "Car");
        assert_eq!(rel.from_cardinality.as_deref(), Some("1"));
        assert_eq!(rel.arrow, Arrow::Association);
        assert_eq!(rel.to_cardinality.as_deref(), Some("1..*"));
        assert_eq!(rel.to, "Wheel");
        assert_eq!(rel.label.as_deref(), Some("rolls on"));
    }

    #[test]
    fn test_parse_arrows() {
        assert_eq!(relationship("Vehicle <|-- Car").arrow, Arrow::Inheritance);
        assert_eq!(relationship("Car ..|> Drivable").arrow, Arrow::Realization);
        assert_eq!(relationship("Car *-- \"1\" Engine").arrow, Arrow::Composition);
        assert_eq!(relationship("Garage o-- \"0..*\" Car").arrow, Arrow::Aggregation);
        assert_eq!(relationship("Car ..> Fuel").arrow, Arrow::Dependency);
        assert_eq!(relationship("Car .. Road").arrow, Arrow::DashedLink);
        assert_eq!(relationship("Car -- \"*\" Door").arrow, Arrow::Link);
    }

    #[test]
    fn test_association_arrows() {
        assert!(Arrow::Association.is_association());
        assert!(Arrow::Composition.is_association());
        assert!(!Arrow::Inheritance.is_association());
        assert!(!Arrow::Dependency.is_association());
    }

    #[test]
    fn test_parse_diagram() {
        let input = "\
%% garage ground truth
classDiagram
    class Car
    class Engine {
        +power: int
    }
    Car --> \"1..1\" Engine
";
        let statements = NotationParser::new().parse_diagram(input).unwrap();
        assert_eq!(statements.len(), 3);
        assert!(matches!(&statements[2], Statement::Relationship(r) if r.to == "Engine"));
    }

    #[test]
    fn test_parse_diagram_without_header() {
        let statements = NotationParser::new()
            .parse_diagram("class Car\nCar --> \"*\" Wheel")
            .unwrap();
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_parse_error() {
        let result = NotationParser::new().parse_diagram("classDiagram\n  Car ==> Wheel");
        assert!(matches!(result, Err(FragmentError::Notation { .. })));
    }
}
