use super::cache::SelectionCache;
use super::config::SelectionConfig;
use super::error::{ParseError, SelectionError, UsageError};
use super::expr::{CompositeFilter, Expr, PropertyField, TextField};
use super::parser::SelectionParser;
use crate::core::models::atom::Atom;
use crate::core::models::coordinates::Coordinates;
use crate::core::models::group::{AtomCollection, AtomGroup};
use crate::core::models::ids::SelectionId;
use crate::core::models::structure::Structure;
use crate::core::utils::{distances, identifiers};
use itertools::Itertools;
use nalgebra::Point3;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument, trace, warn};

/// Unordered atom numbers produced by a single node.
pub type AtomSet = HashSet<usize>;

/// A parsed selection: an immutable expression tree plus the identity under
/// which its results are cached.
#[derive(Debug, Clone)]
pub struct Selection {
    id: SelectionId,
    expr: Expr,
}

impl Selection {
    pub fn new(expr: Expr) -> Self {
        Self {
            id: SelectionId::next(),
            expr,
        }
    }

    /// Parses `text` with the default parser settings.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        SelectionParser::default().parse(text)
    }

    pub fn id(&self) -> SelectionId {
        self.id
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn apply<'s, G>(&self, group: &'s G) -> Result<AtomGroup<'s>, SelectionError>
    where
        G: AtomCollection + ?Sized,
    {
        self.apply_with_config(group, &SelectionConfig::default())
    }

    pub fn apply_with_config<'s, G>(
        &self,
        group: &'s G,
        config: &SelectionConfig,
    ) -> Result<AtomGroup<'s>, SelectionError>
    where
        G: AtomCollection + ?Sized,
    {
        let members = self.evaluate(group, config)?;
        Ok(AtomGroup::new(group.structure(), members))
    }

    /// Like [`apply_with_config`](Self::apply_with_config), but evaluates under
    /// the cache's configuration and reuses and records results in `cache`.
    ///
    /// The cache key includes the structure's coordinate generation, so a
    /// result computed before the coordinates changed is never returned.
    /// Nothing is recorded when evaluation fails.
    pub fn apply_cached<'s, G>(
        &self,
        group: &'s G,
        cache: &mut SelectionCache,
    ) -> Result<AtomGroup<'s>, SelectionError>
    where
        G: AtomCollection + ?Sized,
    {
        let key = group.group_key();
        if let Some(members) = cache.get(self.id, &key) {
            trace!(selection = self.id.value(), "Selection cache hit.");
            return Ok(AtomGroup::new(group.structure(), members.to_vec()));
        }
        trace!(selection = self.id.value(), "Selection cache miss.");

        let members = self.evaluate(group, cache.config())?;
        cache.insert(self.id, key, members.clone());
        Ok(AtomGroup::new(group.structure(), members))
    }

    #[instrument(skip_all, name = "selection_apply", fields(selection = %self.expr))]
    fn evaluate<G>(&self, group: &G, config: &SelectionConfig) -> Result<Vec<usize>, UsageError>
    where
        G: AtomCollection + ?Sized,
    {
        let order = group.members();
        let context =
            EvaluationContext::new(group, &order, config, self.expr.requires_unit_cell())?;

        let members: Vec<usize> = context
            .evaluate(&self.expr)
            .into_iter()
            .sorted_unstable()
            .collect();
        debug!(
            selected = members.len(),
            group_size = order.len(),
            "Selection evaluated."
        );
        Ok(members)
    }
}

impl From<Expr> for Selection {
    fn from(expr: Expr) -> Self {
        Self::new(expr)
    }
}

impl FromStr for Selection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expr, f)
    }
}

/// Everything a node needs to know about the group being selected from.
///
/// Built once per evaluation and handed down by reference, so concurrent
/// evaluations never share state.
struct EvaluationContext<'a> {
    structure: &'a Structure,
    /// Member numbers in the group's current order.
    order: &'a [usize],
    members: AtomSet,
    coordinates: &'a Coordinates,
    /// Edge lengths of a valid unit cell, if the structure has one.
    box_lengths: Option<[f64; 3]>,
    config: &'a SelectionConfig,
}

impl<'a> EvaluationContext<'a> {
    fn new<G>(
        group: &'a G,
        order: &'a [usize],
        config: &'a SelectionConfig,
        requires_unit_cell: bool,
    ) -> Result<Self, UsageError>
    where
        G: AtomCollection + ?Sized,
    {
        let structure = group.structure();
        let atoms = structure.len();
        if let Some(&number) = order.iter().find(|&&number| number >= atoms) {
            return Err(UsageError::MemberOutOfRange { number, atoms });
        }

        let coordinates = group
            .own_coordinates()
            .unwrap_or_else(|| structure.coordinates());
        if coordinates.len() != atoms {
            return Err(UsageError::CoordinateCountMismatch {
                expected: atoms,
                found: coordinates.len(),
            });
        }

        let box_lengths = group
            .unit_cell()
            .filter(|cell| cell.is_valid())
            .map(|cell| cell.lengths());
        if requires_unit_cell && box_lengths.is_none() {
            return Err(UsageError::MissingUnitCell);
        }
        let skewed_cell = group.unit_cell().filter(|cell| {
            requires_unit_cell && cell.angles().iter().any(|angle| (angle - 90.0).abs() > 1e-6)
        });
        if let Some(cell) = skewed_cell {
            warn!(
                angles = ?cell.angles(),
                "Non-orthorhombic cell; periodic distances use the edge lengths only."
            );
        }

        Ok(Self {
            structure,
            order,
            members: order.iter().copied().collect(),
            coordinates,
            box_lengths,
            config,
        })
    }

    fn atoms(&self) -> impl Iterator<Item = &'a Atom> + '_ {
        let structure = self.structure;
        self.order
            .iter()
            .filter_map(move |&number| structure.atom(number))
    }

    fn select(&self, predicate: impl Fn(&'a Atom) -> bool) -> AtomSet {
        self.atoms()
            .filter(|&atom| predicate(atom))
            .map(|atom| atom.number)
            .collect()
    }

    fn box_for(&self, periodic: bool) -> Option<[f64; 3]> {
        if periodic { self.box_lengths } else { None }
    }

    /// Members of `candidates` lying within `cutoff` of any reference point.
    fn within(
        &self,
        candidates: Vec<usize>,
        references: &[Point3<f64>],
        cutoff: f64,
        periodic: bool,
    ) -> AtomSet {
        let positions = self.coordinates.gather(&candidates);
        let flags =
            distances::within_cutoff(&positions, references, cutoff, self.box_for(periodic));
        candidates
            .into_iter()
            .zip(flags)
            .filter_map(|(number, hit)| hit.then_some(number))
            .collect()
    }

    fn evaluate(&self, expr: &Expr) -> AtomSet {
        match expr {
            Expr::All => self.members.clone(),
            Expr::Not(inner) => &self.members - &self.evaluate(inner),
            Expr::And(left, right) => &self.evaluate(left) & &self.evaluate(right),
            Expr::Or(left, right) => &self.evaluate(left) | &self.evaluate(right),
            Expr::Around {
                inner,
                cutoff,
                periodic,
            } => {
                let inner = self.evaluate(inner);
                let references: Vec<usize> = inner.iter().copied().collect();
                let candidates = self
                    .order
                    .iter()
                    .copied()
                    .filter(|number| !inner.contains(number))
                    .unique()
                    .collect();
                self.within(
                    candidates,
                    &self.coordinates.gather(&references),
                    *cutoff,
                    *periodic,
                )
            }
            Expr::Point {
                x,
                y,
                z,
                cutoff,
                periodic,
            } => {
                let candidates = self.order.iter().copied().unique().collect();
                self.within(candidates, &[Point3::new(*x, *y, *z)], *cutoff, *periodic)
            }
            Expr::Composite(filter) => self.select(|atom| composite_matches(filter, atom)),
            Expr::AtomExact { segid, resid, name } => self
                .atoms()
                .find(|atom| atom.segid == *segid && atom.resid == *resid && atom.name == *name)
                .map(|atom| atom.number)
                .into_iter()
                .collect(),
            Expr::StringField { field, pattern } => {
                self.select(|atom| matches_pattern(text_value(atom, *field), pattern))
            }
            Expr::ByRes(inner) => {
                let inner = self.evaluate(inner);
                let residues: HashSet<(isize, &str)> = inner
                    .iter()
                    .filter_map(|&number| self.structure.atom(number))
                    .map(Atom::residue_key)
                    .collect();
                self.select(|atom| residues.contains(&atom.residue_key()))
            }
            Expr::ResidueIdRange { lower, upper } => self.select(|atom| match upper {
                Some(upper) => *lower <= atom.resid && atom.resid <= *upper,
                None => atom.resid == *lower,
            }),
            Expr::ByNumRange { lower, upper } => {
                let end = upper.unwrap_or(*lower).min(self.order.len());
                let start = lower.saturating_sub(1).min(end);
                self.order[start..end].iter().copied().collect()
            }
            Expr::Bonded(inner) => {
                let inner = self.evaluate(inner);
                self.structure
                    .bonds()
                    .iter()
                    .flat_map(|bond| {
                        [bond.atom1, bond.atom2]
                            .into_iter()
                            .filter(|number| inner.contains(number))
                            .filter_map(|number| bond.partner(number))
                    })
                    .filter(|partner| self.members.contains(partner))
                    .collect()
            }
            Expr::Property {
                field,
                comparator,
                value,
                abs,
            } => self.select(|atom| {
                let raw = match field {
                    PropertyField::X => self.coordinates.get(atom.number).map(|p| p.x),
                    PropertyField::Y => self.coordinates.get(atom.number).map(|p| p.y),
                    PropertyField::Z => self.coordinates.get(atom.number).map(|p| p.z),
                    PropertyField::Mass => Some(atom.mass),
                    PropertyField::Charge => Some(atom.charge),
                };
                raw.is_some_and(|raw| {
                    let lhs = if *abs { raw.abs() } else { raw };
                    comparator.compare(lhs, *value)
                })
            }),
            Expr::Protein => self.select(|atom| self.config.is_protein_residue(&atom.resname)),
            Expr::Backbone => self.select(|atom| {
                self.config.is_protein_residue(&atom.resname)
                    && identifiers::is_backbone_atom(&atom.name)
            }),
            Expr::CAlpha => self.select(|atom| {
                self.config.is_protein_residue(&atom.resname)
                    && identifiers::is_alpha_carbon(&atom.name)
            }),
        }
    }
}

fn text_value(atom: &Atom, field: TextField) -> &str {
    match field {
        TextField::Name => &atom.name,
        TextField::Type => &atom.atom_type,
        TextField::Resname => &atom.resname,
        TextField::Segid => &atom.segid,
    }
}

/// Exact match, or prefix match when the pattern contains `*`.
///
/// Everything from the first `*` on is ignored, and the value must be longer
/// than the remaining prefix: `AL*` matches `ALA` but not `AL`.
fn matches_pattern(value: &str, pattern: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, _)) => value.len() > prefix.len() && value.starts_with(prefix),
        None => value == pattern,
    }
}

fn composite_matches(filter: &CompositeFilter, atom: &Atom) -> bool {
    filter.name.as_deref().is_none_or(|name| atom.name == name)
        && filter
            .atom_type
            .as_deref()
            .is_none_or(|atom_type| atom.atom_type == atom_type)
        && filter
            .resname
            .as_deref()
            .is_none_or(|resname| atom.resname == resname)
        && filter.resid.is_none_or(|resid| atom.resid == resid)
        && filter.segid.as_deref().is_none_or(|segid| atom.segid == segid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cell::UnitCell;
    use crate::core::models::group::GroupKey;
    use crate::core::models::test_utils::{fragment_structure, scenario_structure};

    fn select<G: AtomCollection + ?Sized>(group: &G, text: &str) -> Vec<usize> {
        Selection::parse(text)
            .unwrap()
            .apply(group)
            .unwrap()
            .numbers()
            .to_vec()
    }

    fn select_nonperiodic<G: AtomCollection + ?Sized>(group: &G, text: &str) -> Vec<usize> {
        SelectionParser::with_periodic(false)
            .parse(text)
            .unwrap()
            .apply(group)
            .unwrap()
            .numbers()
            .to_vec()
    }

    fn select_expr(structure: &Structure, expr: Expr) -> Vec<usize> {
        Selection::new(expr)
            .apply(structure)
            .unwrap()
            .numbers()
            .to_vec()
    }

    #[test]
    fn scenario_selections_match_expected_atoms() {
        let structure = scenario_structure();
        assert_eq!(select(&structure, "name CA"), vec![0, 2]);
        assert_eq!(select(&structure, "resid 1"), vec![0, 1]);
        assert_eq!(select(&structure, "protein and name CA"), vec![0, 2]);
        assert_eq!(select(&structure, "byres name CB"), vec![0, 1]);
        assert_eq!(select(&structure, "resid 1:2"), vec![0, 1, 2]);
        assert!(select(&structure, "resid 3").is_empty());
    }

    #[test]
    fn all_returns_group_in_ascending_order() {
        let structure = fragment_structure();
        assert_eq!(select(&structure, "all"), (0..12).collect::<Vec<_>>());

        let shuffled = AtomGroup::new(&structure, vec![9, 2, 11, 0]);
        assert_eq!(select(&shuffled, "all"), vec![0, 2, 9, 11]);
    }

    #[test]
    fn boolean_identities_hold() {
        let structure = fragment_structure();
        let e = Expr::name("CA") | Expr::resname("TIP3");
        let whole = select(&structure, "all");

        assert_eq!(
            select_expr(&structure, !!e.clone()),
            select_expr(&structure, e.clone())
        );
        assert_eq!(
            select_expr(&structure, e.clone() & e.clone()),
            select_expr(&structure, e.clone())
        );
        assert_eq!(select_expr(&structure, e.clone() | !e), whole);
    }

    #[test]
    fn degenerate_residue_range_equals_single_residue() {
        let structure = fragment_structure();
        assert_eq!(
            select_expr(&structure, Expr::resid(2, Some(2))),
            select_expr(&structure, Expr::resid(2, None))
        );
        assert!(select_expr(&structure, Expr::resid(5, Some(3))).is_empty());
    }

    #[test]
    fn empty_subselections_propagate() {
        let structure = fragment_structure();
        assert!(select(&structure, "resid 99 and protein").is_empty());
        assert!(select(&structure, "not all").is_empty());
        assert!(select(&structure, "around 5 resid 99").is_empty());
        assert!(select(&structure, "byres resid 99").is_empty());
        assert_eq!(select(&structure, "resid 99 or resid 10"), vec![8, 9]);
    }

    #[test]
    fn wildcard_matches_longer_values_with_the_prefix() {
        let structure = fragment_structure();
        assert_eq!(select(&structure, "name C*"), vec![1, 4, 6, 8]);
        assert_eq!(select(&structure, "name O*"), vec![9, 10, 11]);
        assert_eq!(select(&structure, "resname TIP*"), vec![10, 11]);
        assert_eq!(select(&structure, "name C"), vec![2]);
    }

    #[test]
    fn matches_pattern_ignores_text_after_the_star() {
        assert!(matches_pattern("ALA", "AL*"));
        assert!(matches_pattern("ALB", "AL*X"));
        assert!(!matches_pattern("AL", "AL*"));
        assert!(!matches_pattern("GLY", "AL*"));
        assert!(matches_pattern("X", "*"));
        assert!(!matches_pattern("", "*"));
    }

    #[test]
    fn text_fields_select_by_type_and_segid() {
        let structure = scenario_structure();
        assert_eq!(select(&structure, "type CT*"), vec![0, 1, 2]);
        assert_eq!(select(&structure, "type CT3"), vec![1]);
        assert_eq!(select(&structure, "segid A"), vec![0, 1, 2]);
        assert!(select(&structure, "segid B").is_empty());
    }

    #[test]
    fn static_tables_select_protein_backbone_and_alpha_carbons() {
        let structure = fragment_structure();
        assert_eq!(select(&structure, "protein"), (0..8).collect::<Vec<_>>());
        assert_eq!(select(&structure, "backbone"), vec![0, 1, 2, 3, 5, 6]);
        assert_eq!(select_expr(&structure, Expr::CAlpha), vec![1, 6]);
    }

    #[test]
    fn configured_residues_extend_the_protein_table() {
        let structure = fragment_structure();
        let config = SelectionConfig::builder()
            .extra_protein_residue("LIG")
            .build()
            .unwrap();
        let group = Selection::parse("protein")
            .unwrap()
            .apply_with_config(&structure, &config)
            .unwrap();
        assert_eq!(group.numbers(), (0..10).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn byres_keys_on_residue_number_and_segment() {
        let mut structure = Structure::new();
        structure.add_atom(Atom::new("CA", "ALA", 1, "A"), Point3::origin());
        structure.add_atom(Atom::new("CB", "ALA", 1, "A"), Point3::origin());
        structure.add_atom(Atom::new("CA", "ALA", 1, "B"), Point3::origin());

        assert_eq!(select(&structure, "byres name CB"), vec![0, 1]);
        assert_eq!(select(&fragment_structure(), "byres name NZ"), vec![5, 6, 7]);
    }

    #[test]
    fn around_excludes_its_own_selection() {
        let structure = fragment_structure();
        let selected = select_nonperiodic(&structure, "around 2 name CA");
        assert_eq!(selected, vec![0, 2, 3, 4, 5, 7]);
        assert!(!selected.contains(&1));
        assert!(!selected.contains(&6));
    }

    #[test]
    fn periodic_around_sees_across_the_box_boundary() {
        let structure = fragment_structure();
        assert_eq!(select(&structure, "around 1 atom PROT 1 N"), vec![1, 11]);
        assert_eq!(select_nonperiodic(&structure, "around 1 atom PROT 1 N"), vec![1]);
    }

    #[test]
    fn point_selects_atoms_near_a_position() {
        let structure = fragment_structure();
        assert_eq!(select_nonperiodic(&structure, "point 1.5 10.5 0 0"), vec![8, 9]);
        assert_eq!(select(&structure, "point 1 0 0 0"), vec![0, 1, 11]);
    }

    #[test]
    fn bynum_is_positional_within_the_group() {
        let structure = fragment_structure();
        assert_eq!(select(&structure, "bynum 2:3"), vec![1, 2]);

        let ligand_and_water = AtomGroup::new(&structure, vec![8, 9, 10, 11]);
        assert_eq!(select(&ligand_and_water, "bynum 2:3"), vec![9, 10]);
        assert_eq!(select(&ligand_and_water, "bynum 3:100"), vec![10, 11]);
        assert!(select(&ligand_and_water, "bynum 9").is_empty());

        let reversed = AtomGroup::new(&structure, vec![11, 10, 9, 8]);
        assert_eq!(select(&reversed, "bynum 1"), vec![11]);
    }

    #[test]
    fn bonded_finds_partners_inside_the_group() {
        let structure = fragment_structure();
        assert_eq!(select(&structure, "bonded name CA"), vec![0, 2, 4, 5, 7]);

        let first_three = AtomGroup::new(&structure, vec![0, 1, 2]);
        assert_eq!(select(&first_three, "bonded name CA"), vec![0, 2]);
        assert!(select(&structure, "bonded resname TIP3").is_empty());
    }

    #[test]
    fn property_compares_coordinates_and_attributes() {
        let structure = fragment_structure();
        assert_eq!(select(&structure, "prop x >= 15"), vec![10, 11]);
        assert_eq!(select(&structure, "prop charge < -0.5"), vec![3, 10, 11]);
        assert_eq!(select(&structure, "prop abs charge > 0.5"), vec![2, 3, 10, 11]);
        assert_eq!(select(&structure, "prop mass == 15.999"), vec![3, 9, 10, 11]);
        assert_eq!(select(&structure, "prop y != 0"), Vec::<usize>::new());
    }

    #[test]
    fn property_reads_live_coordinates() {
        let mut structure = fragment_structure();
        structure
            .set_position(0, Point3::new(-16.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(select(&structure, "prop abs x >= 15"), vec![0, 10, 11]);
        assert_eq!(select(&structure, "prop x < 0"), vec![0]);
    }

    #[test]
    fn atom_exact_returns_at_most_one_atom() {
        let structure = fragment_structure();
        assert_eq!(select(&structure, "atom PROT 2 CA"), vec![6]);
        assert!(select(&structure, "atom PROT 3 CA").is_empty());
    }

    #[test]
    fn composite_requires_every_given_field() {
        let structure = fragment_structure();
        let filter = CompositeFilter {
            resname: Some("ALA".into()),
            name: Some("C".into()),
            ..Default::default()
        };
        assert_eq!(select_expr(&structure, Expr::Composite(filter)), vec![2]);
        assert_eq!(
            select_expr(&structure, Expr::Composite(CompositeFilter::default())),
            (0..12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn results_can_be_selected_from_again() {
        let structure = fragment_structure();
        let protein = Selection::parse("protein").unwrap().apply(&structure).unwrap();
        assert_eq!(select(&protein, "name CA"), vec![1, 6]);
        assert!(select(&protein, "resname LIG").is_empty());
    }

    #[test]
    fn periodic_selection_without_cell_is_a_usage_error() {
        let mut structure = fragment_structure();
        structure.set_unit_cell(None);

        let err = Selection::parse("around 3 name CA")
            .unwrap()
            .apply(&structure)
            .unwrap_err();
        assert_eq!(err, SelectionError::Usage(UsageError::MissingUnitCell));

        assert_eq!(
            select_nonperiodic(&structure, "around 1 atom PROT 1 N"),
            vec![1]
        );
        assert_eq!(select(&structure, "name CA"), vec![1, 6]);
    }

    #[test]
    fn degenerate_cell_counts_as_missing() {
        let mut structure = fragment_structure();
        structure.set_unit_cell(Some(UnitCell::orthorhombic(0.0, 20.0, 20.0)));
        let err = Selection::parse("point 1 0 0 0")
            .unwrap()
            .apply(&structure)
            .unwrap_err();
        assert_eq!(err, SelectionError::Usage(UsageError::MissingUnitCell));
    }

    #[test]
    fn out_of_range_member_is_a_usage_error() {
        let structure = scenario_structure();
        let group = AtomGroup::new(&structure, vec![0, 99]);
        let err = Selection::parse("all").unwrap().apply(&group).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Usage(UsageError::MemberOutOfRange {
                number: 99,
                atoms: 3
            })
        );
    }

    struct Frame<'a> {
        structure: &'a Structure,
        coordinates: Coordinates,
    }

    impl AtomCollection for Frame<'_> {
        fn structure(&self) -> &Structure {
            self.structure
        }
        fn members(&self) -> std::borrow::Cow<'_, [usize]> {
            std::borrow::Cow::Owned((0..self.structure.len()).collect())
        }
        fn own_coordinates(&self) -> Option<&Coordinates> {
            Some(&self.coordinates)
        }
        fn group_key(&self) -> GroupKey {
            self.structure.group_key()
        }
    }

    #[test]
    fn own_coordinate_table_is_used_when_present() {
        let structure = scenario_structure();
        let frame = Frame {
            structure: &structure,
            coordinates: Coordinates::from(vec![[10.0, 0.0, 0.0], [0.0, 0.0, 0.0], [3.8, 0.0, 0.0]]),
        };
        assert_eq!(select(&frame, "prop x > 5"), vec![0]);
        assert_eq!(select(&structure, "prop x > 5"), Vec::<usize>::new());
    }

    #[test]
    fn mismatched_coordinate_table_is_a_usage_error() {
        let structure = scenario_structure();
        let frame = Frame {
            structure: &structure,
            coordinates: Coordinates::from(vec![[0.0, 0.0, 0.0]]),
        };
        let err = Selection::parse("all").unwrap().apply(&frame).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Usage(UsageError::CoordinateCountMismatch {
                expected: 3,
                found: 1
            })
        );
    }

    #[test]
    fn cached_results_are_reused_until_coordinates_change() {
        let mut structure = fragment_structure();
        let selection = SelectionParser::with_periodic(false)
            .parse("around 1.5 resname LIG")
            .unwrap();
        let mut cache = SelectionCache::new();

        let first = selection
            .apply_cached(&structure, &mut cache)
            .unwrap()
            .numbers()
            .to_vec();
        let second = selection
            .apply_cached(&structure, &mut cache)
            .unwrap()
            .numbers()
            .to_vec();
        assert!(first.is_empty());
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        structure
            .set_position(7, Point3::new(9.0, 0.0, 0.0))
            .unwrap();
        let moved = selection.apply_cached(&structure, &mut cache).unwrap();
        assert_eq!(moved.numbers(), &[7]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn caches_with_different_configs_do_not_share_results() {
        let mut structure = Structure::new();
        structure.add_atom(Atom::new("C1", "LIG", 1, "L"), Point3::origin());
        let selection = Selection::parse("protein").unwrap();
        let ligand_config = SelectionConfig::builder()
            .extra_protein_residue("LIG")
            .build()
            .unwrap();

        let mut default_cache = SelectionCache::new();
        let mut ligand_cache = SelectionCache::with_config(ligand_config.clone());
        let plain = selection.apply_cached(&structure, &mut default_cache).unwrap();
        let extended = selection.apply_cached(&structure, &mut ligand_cache).unwrap();

        assert!(plain.is_empty());
        assert_eq!(extended.numbers(), &[0]);
        assert_eq!(
            extended,
            selection.apply_with_config(&structure, &ligand_config).unwrap()
        );
    }

    #[test]
    fn failed_evaluation_leaves_cache_untouched() {
        let mut structure = fragment_structure();
        structure.set_unit_cell(None);
        let selection = Selection::parse("around 3 protein").unwrap();
        let mut cache = SelectionCache::new();

        let result = selection.apply_cached(&structure, &mut cache);
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn around_handles_many_atoms_at_one_position() {
        let mut structure = Structure::new();
        for _ in 0..40 {
            structure.add_atom(Atom::new("CA", "ALA", 1, "A"), Point3::origin());
        }
        structure.add_atom(Atom::new("O", "HOH", 2, "W"), Point3::new(0.5, 0.0, 0.0));
        structure.add_atom(Atom::new("O", "HOH", 3, "W"), Point3::new(4.0, 0.0, 0.0));

        assert_eq!(select_nonperiodic(&structure, "around 1 name CA"), vec![40]);
        assert_eq!(
            select_nonperiodic(&structure, "point 1 0.5 0 0"),
            (0..41).collect::<Vec<_>>()
        );
    }

    #[test]
    fn every_selection_gets_its_own_identity() {
        let first = Selection::parse("protein").unwrap();
        let second = Selection::parse("protein").unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.expr(), second.expr());
        assert_eq!(first.to_string(), "protein");

        let from_expr: Selection = (Expr::Protein & Expr::name("CA")).into();
        assert_eq!(from_expr.to_string(), "( protein and name CA )");
        assert!("name".parse::<Selection>().is_err());
    }
}
