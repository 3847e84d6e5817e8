use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

/// Textual atom attributes a `name`/`type`/`resname`/`segid` term filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Type,
    Resname,
    Segid,
}

impl TextField {
    pub fn keyword(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Type => "type",
            TextField::Resname => "resname",
            TextField::Segid => "segid",
        }
    }
}

/// Numeric atom properties usable in a `prop` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyField {
    X,
    Y,
    Z,
    Mass,
    Charge,
}

impl PropertyField {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyField::X => "x",
            PropertyField::Y => "y",
            PropertyField::Z => "z",
            PropertyField::Mass => "mass",
            PropertyField::Charge => "charge",
        }
    }

    /// Whether the property is read from the live coordinate table.
    pub fn is_coordinate(self) -> bool {
        matches!(self, PropertyField::X | PropertyField::Y | PropertyField::Z)
    }
}

impl FromStr for PropertyField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(PropertyField::X),
            "y" => Ok(PropertyField::Y),
            "z" => Ok(PropertyField::Z),
            "mass" => Ok(PropertyField::Mass),
            "charge" => Ok(PropertyField::Charge),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Equal,
    NotEqual,
}

impl Comparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Greater => ">",
            Comparator::Less => "<",
            Comparator::GreaterEqual => ">=",
            Comparator::LessEqual => "<=",
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
        }
    }

    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparator::Greater => lhs > rhs,
            Comparator::Less => lhs < rhs,
            Comparator::GreaterEqual => lhs >= rhs,
            Comparator::LessEqual => lhs <= rhs,
            Comparator::Equal => lhs == rhs,
            Comparator::NotEqual => lhs != rhs,
        }
    }
}

impl FromStr for Comparator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Comparator::Greater),
            "<" => Ok(Comparator::Less),
            ">=" => Ok(Comparator::GreaterEqual),
            "<=" => Ok(Comparator::LessEqual),
            "==" => Ok(Comparator::Equal),
            "!=" => Ok(Comparator::NotEqual),
            _ => Err(()),
        }
    }
}

/// A conjunction of exact attribute matches; absent fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompositeFilter {
    pub name: Option<String>,
    pub atom_type: Option<String>,
    pub resname: Option<String>,
    pub resid: Option<isize>,
    pub segid: Option<String>,
}

/// A node of a parsed selection.
///
/// Every node owns its children, so trees are finite and acyclic. Nodes carry
/// no evaluation state; the same tree can be applied to any number of groups.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    All,
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Around {
        inner: Box<Expr>,
        cutoff: f64,
        periodic: bool,
    },
    Point {
        x: f64,
        y: f64,
        z: f64,
        cutoff: f64,
        periodic: bool,
    },
    Composite(CompositeFilter),
    AtomExact {
        segid: String,
        resid: isize,
        name: String,
    },
    /// Match on one text attribute; a `*` ends the pattern at a prefix.
    StringField {
        field: TextField,
        pattern: String,
    },
    ByRes(Box<Expr>),
    /// Inclusive residue-number range. The text form only has negative numbers
    /// for a single residue, not for range bounds.
    ResidueIdRange {
        lower: isize,
        upper: Option<isize>,
    },
    /// 1-based positions within the group being selected from. A bound of 0
    /// has no text form.
    ByNumRange {
        lower: usize,
        upper: Option<usize>,
    },
    Bonded(Box<Expr>),
    Property {
        field: PropertyField,
        comparator: Comparator,
        value: f64,
        abs: bool,
    },
    Protein,
    Backbone,
    CAlpha,
}

impl Expr {
    pub fn name(pattern: &str) -> Self {
        Self::text(TextField::Name, pattern)
    }

    pub fn atom_type(pattern: &str) -> Self {
        Self::text(TextField::Type, pattern)
    }

    pub fn resname(pattern: &str) -> Self {
        Self::text(TextField::Resname, pattern)
    }

    pub fn segid(pattern: &str) -> Self {
        Self::text(TextField::Segid, pattern)
    }

    pub fn text(field: TextField, pattern: &str) -> Self {
        Expr::StringField {
            field,
            pattern: pattern.to_string(),
        }
    }

    pub fn resid(lower: isize, upper: Option<isize>) -> Self {
        Expr::ResidueIdRange { lower, upper }
    }

    pub fn around(inner: Expr, cutoff: f64, periodic: bool) -> Self {
        Expr::Around {
            inner: Box::new(inner),
            cutoff,
            periodic,
        }
    }

    pub fn by_res(inner: Expr) -> Self {
        Expr::ByRes(Box::new(inner))
    }

    pub fn bonded(inner: Expr) -> Self {
        Expr::Bonded(Box::new(inner))
    }

    /// True if evaluating this tree needs periodic cell lengths.
    pub fn requires_unit_cell(&self) -> bool {
        match self {
            Expr::Around {
                inner, periodic, ..
            } => *periodic || inner.requires_unit_cell(),
            Expr::Point { periodic, .. } => *periodic,
            Expr::Not(inner) | Expr::ByRes(inner) | Expr::Bonded(inner) => {
                inner.requires_unit_cell()
            }
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.requires_unit_cell() || right.requires_unit_cell()
            }
            _ => false,
        }
    }
}

fn write_conjunction(f: &mut fmt::Formatter<'_>, terms: &[String]) -> fmt::Result {
    match terms {
        [] => f.write_str("all"),
        [single] => f.write_str(single),
        _ => write!(f, "( {} )", terms.join(" and ")),
    }
}

/// Renders selection text that parses back into a tree of the same shape.
///
/// Every non-leaf node is wrapped in parentheses. `Composite` and `CAlpha`
/// have no keyword of their own and render as the equivalent conjunction.
/// The periodic flag of proximity nodes is not part of the text; it comes
/// from the parser configuration.
///
/// Trees built by the parser always round-trip. A hand-built tree can hold
/// values the grammar cannot spell: a `ResidueIdRange` with an upper bound
/// and a negative bound, or a `ByNumRange` with a bound of 0. Such trees
/// still render, but the text is rejected by the parser.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::All => f.write_str("all"),
            Expr::Protein => f.write_str("protein"),
            Expr::Backbone => f.write_str("backbone"),
            Expr::CAlpha => f.write_str("( protein and name CA )"),
            Expr::Not(inner) => write!(f, "( not {inner} )"),
            Expr::And(left, right) => write!(f, "( {left} and {right} )"),
            Expr::Or(left, right) => write!(f, "( {left} or {right} )"),
            Expr::ByRes(inner) => write!(f, "( byres {inner} )"),
            Expr::Bonded(inner) => write!(f, "( bonded {inner} )"),
            Expr::Around { inner, cutoff, .. } => write!(f, "( around {cutoff} {inner} )"),
            Expr::Point {
                x, y, z, cutoff, ..
            } => write!(f, "point {cutoff} {x} {y} {z}"),
            Expr::StringField { field, pattern } => write!(f, "{} {pattern}", field.keyword()),
            Expr::AtomExact { segid, resid, name } => write!(f, "atom {segid} {resid} {name}"),
            Expr::ResidueIdRange { lower, upper } => match upper {
                Some(upper) => write!(f, "resid {lower}:{upper}"),
                None => write!(f, "resid {lower}"),
            },
            Expr::ByNumRange { lower, upper } => match upper {
                Some(upper) => write!(f, "bynum {lower}:{upper}"),
                None => write!(f, "bynum {lower}"),
            },
            Expr::Property {
                field,
                comparator,
                value,
                abs,
            } => {
                let abs = if *abs { "abs " } else { "" };
                write!(
                    f,
                    "prop {abs}{} {} {value}",
                    field.as_str(),
                    comparator.as_str()
                )
            }
            Expr::Composite(filter) => {
                let mut terms = Vec::new();
                if let Some(segid) = &filter.segid {
                    terms.push(format!("segid {segid}"));
                }
                if let Some(resname) = &filter.resname {
                    terms.push(format!("resname {resname}"));
                }
                if let Some(resid) = filter.resid {
                    terms.push(format!("resid {resid}"));
                }
                if let Some(name) = &filter.name {
                    terms.push(format!("name {name}"));
                }
                if let Some(atom_type) = &filter.atom_type {
                    terms.push(format!("type {atom_type}"));
                }
                write_conjunction(f, &terms)
            }
        }
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_render_without_parentheses() {
        assert_eq!(Expr::name("CA").to_string(), "name CA");
        assert_eq!(Expr::resid(1, Some(5)).to_string(), "resid 1:5");
        assert_eq!(Expr::resid(-3, None).to_string(), "resid -3");
        assert_eq!(
            Expr::ByNumRange {
                lower: 2,
                upper: None
            }
            .to_string(),
            "bynum 2"
        );
        assert_eq!(
            Expr::AtomExact {
                segid: "A".into(),
                resid: 7,
                name: "CB".into()
            }
            .to_string(),
            "atom A 7 CB"
        );
    }

    #[test]
    fn combinators_are_parenthesized_with_spaced_parens() {
        let expr = Expr::Protein & !Expr::name("H*");
        assert_eq!(expr.to_string(), "( protein and ( not name H* ) )");

        let expr = Expr::around(Expr::resname("LIG") | Expr::segid("HET"), 4.5, false);
        assert_eq!(
            expr.to_string(),
            "( around 4.5 ( resname LIG or segid HET ) )"
        );
    }

    #[test]
    fn property_and_point_render_numbers_compactly() {
        let prop = Expr::Property {
            field: PropertyField::Z,
            comparator: Comparator::GreaterEqual,
            value: -1.5,
            abs: true,
        };
        assert_eq!(prop.to_string(), "prop abs z >= -1.5");

        let point = Expr::Point {
            x: 1.0,
            y: 2.0,
            z: 3.25,
            cutoff: 5.0,
            periodic: true,
        };
        assert_eq!(point.to_string(), "point 5 1 2 3.25");
    }

    #[test]
    fn composite_and_calpha_render_as_conjunctions() {
        assert_eq!(Expr::CAlpha.to_string(), "( protein and name CA )");

        let empty = Expr::Composite(CompositeFilter::default());
        assert_eq!(empty.to_string(), "all");

        let single = Expr::Composite(CompositeFilter {
            name: Some("CA".into()),
            ..Default::default()
        });
        assert_eq!(single.to_string(), "name CA");

        let triple = Expr::Composite(CompositeFilter {
            name: Some("CA".into()),
            resid: Some(4),
            segid: Some("A".into()),
            ..Default::default()
        });
        assert_eq!(triple.to_string(), "( segid A and resid 4 and name CA )");
    }

    #[test]
    fn requires_unit_cell_looks_through_combinators() {
        let periodic = Expr::around(Expr::name("CA"), 3.0, true);
        let plain = Expr::around(Expr::name("CA"), 3.0, false);

        assert!(periodic.requires_unit_cell());
        assert!(!plain.requires_unit_cell());
        assert!((Expr::Protein & !periodic.clone()).requires_unit_cell());
        assert!(Expr::around(periodic, 1.0, false).requires_unit_cell());
        assert!(!(Expr::All | plain).requires_unit_cell());
    }

    #[test]
    fn comparators_follow_their_symbols() {
        for (text, lhs, rhs, expected) in [
            (">", 2.0, 1.0, true),
            ("<", 2.0, 1.0, false),
            (">=", 1.0, 1.0, true),
            ("<=", 1.5, 1.0, false),
            ("==", 1.0, 1.0, true),
            ("!=", 1.0, 1.0, false),
        ] {
            let comparator: Comparator = text.parse().unwrap();
            assert_eq!(comparator.as_str(), text);
            assert_eq!(comparator.compare(lhs, rhs), expected, "{lhs} {text} {rhs}");
        }
        assert!("=>".parse::<Comparator>().is_err());
    }

    #[test]
    fn property_fields_parse_from_lowercase_names() {
        assert_eq!("mass".parse::<PropertyField>(), Ok(PropertyField::Mass));
        assert!("x".parse::<PropertyField>().unwrap().is_coordinate());
        assert!(!PropertyField::Charge.is_coordinate());
        assert!("radius".parse::<PropertyField>().is_err());
    }

    #[test]
    fn ranges_outside_the_grammar_render_but_do_not_parse() {
        let parser = crate::selection::parser::SelectionParser::default();
        let out_of_grammar = [
            Expr::resid(-3, Some(5)),
            Expr::resid(2, Some(-1)),
            Expr::ByNumRange {
                lower: 0,
                upper: None,
            },
            Expr::ByNumRange {
                lower: 0,
                upper: Some(3),
            },
        ];
        for expr in out_of_grammar {
            let text = expr.to_string();
            assert!(parser.parse_expr(&text).is_err(), "{text} parsed");
        }

        let single_negative = Expr::resid(-3, None);
        assert_eq!(
            parser.parse_expr(&single_negative.to_string()).unwrap(),
            single_negative
        );
    }
}
