//! Naming binary ionic, binary covalent and polyatomic compounds from
//! their formulas.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::error::DrillError;
use crate::model::{Difficulty, ExpectedAnswer, Problem, Topic};
use crate::traits::ProblemGenerator;

const KINDS: &[&str] = &["ionic", "covalent", "polyatomic", "mixed"];

const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

/// One element of the periodic table, periods 1 to 6 without the
/// lanthanides and actinides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub period: u8,
    pub group: u8,
    /// Common ionic charges. Metals are positive, nonmetals negative.
    pub charges: &'static [i64],
    /// Name as a monatomic anion; `None` for metals.
    pub anion: Option<&'static str>,
}

impl Element {
    pub fn is_metal(&self) -> bool {
        self.anion.is_none()
    }
}

macro_rules! element {
    ($sym:literal, $name:literal, $period:literal, $group:literal, [$($c:expr),+]) => {
        Element { symbol: $sym, name: $name, period: $period, group: $group, charges: &[$($c),+], anion: None }
    };
    ($sym:literal, $name:literal, $period:literal, $group:literal, [$($c:expr),+], $anion:literal) => {
        Element { symbol: $sym, name: $name, period: $period, group: $group, charges: &[$($c),+], anion: Some($anion) }
    };
}

pub const ELEMENTS: &[Element] = &[
    element!("H", "Hydrogen", 1, 1, [-1], "hydride"),
    element!("Li", "Lithium", 2, 1, [1]),
    element!("Be", "Beryllium", 2, 2, [2]),
    element!("B", "Boron", 2, 13, [-3], "boride"),
    element!("C", "Carbon", 2, 14, [-4], "carbide"),
    element!("N", "Nitrogen", 2, 15, [-3], "nitride"),
    element!("O", "Oxygen", 2, 16, [-2], "oxide"),
    element!("F", "Fluorine", 2, 17, [-1], "fluoride"),
    element!("Na", "Sodium", 3, 1, [1]),
    element!("Mg", "Magnesium", 3, 2, [2]),
    element!("Al", "Aluminum", 3, 13, [3]),
    element!("Si", "Silicon", 3, 14, [-4], "silicide"),
    element!("P", "Phosphorus", 3, 15, [-3], "phosphide"),
    element!("S", "Sulfur", 3, 16, [-2], "sulfide"),
    element!("Cl", "Chlorine", 3, 17, [-1], "chloride"),
    element!("K", "Potassium", 4, 1, [1]),
    element!("Ca", "Calcium", 4, 2, [2]),
    element!("Sc", "Scandium", 4, 3, [3]),
    element!("Ti", "Titanium", 4, 4, [4, 3]),
    element!("V", "Vanadium", 4, 5, [5, 4, 3, 2]),
    element!("Cr", "Chromium", 4, 6, [6, 3, 2]),
    element!("Mn", "Manganese", 4, 7, [7, 4, 2]),
    element!("Fe", "Iron", 4, 8, [3, 2]),
    element!("Co", "Cobalt", 4, 9, [3, 2]),
    element!("Ni", "Nickel", 4, 10, [2]),
    element!("Cu", "Copper", 4, 11, [2, 1]),
    element!("Zn", "Zinc", 4, 12, [2]),
    element!("Ga", "Gallium", 4, 13, [3]),
    element!("Ge", "Germanium", 4, 14, [4]),
    element!("As", "Arsenic", 4, 15, [-3], "arsenide"),
    element!("Se", "Selenium", 4, 16, [-2], "selenide"),
    element!("Br", "Bromine", 4, 17, [-1], "bromide"),
    element!("Rb", "Rubidium", 5, 1, [1]),
    element!("Sr", "Strontium", 5, 2, [2]),
    element!("Y", "Yttrium", 5, 3, [3]),
    element!("Zr", "Zirconium", 5, 4, [4]),
    element!("Nb", "Niobium", 5, 5, [5, 3]),
    element!("Mo", "Molybdenum", 5, 6, [6, 3]),
    element!("Tc", "Technetium", 5, 7, [6]),
    element!("Ru", "Ruthenium", 5, 8, [8, 4, 3]),
    element!("Rh", "Rhodium", 5, 9, [4]),
    element!("Pd", "Palladium", 5, 10, [4, 2]),
    element!("Ag", "Silver", 5, 11, [1]),
    element!("Cd", "Cadmium", 5, 12, [2]),
    element!("In", "Indium", 5, 13, [3]),
    element!("Sn", "Tin", 5, 14, [4, 2]),
    element!("Sb", "Antimony", 5, 15, [-3], "antimonide"),
    element!("Te", "Tellurium", 5, 16, [-2], "telluride"),
    element!("I", "Iodine", 5, 17, [-1], "iodide"),
    element!("Cs", "Cesium", 6, 1, [1]),
    element!("Ba", "Barium", 6, 2, [2]),
    element!("Hf", "Hafnium", 6, 4, [4]),
    element!("Ta", "Tantalum", 6, 5, [5]),
    element!("W", "Tungsten", 6, 6, [6]),
    element!("Re", "Rhenium", 6, 7, [7, 6, 4, 2]),
    element!("Os", "Osmium", 6, 8, [6, 4, 3]),
    element!("Ir", "Iridium", 6, 9, [6, 4, 3]),
    element!("Pt", "Platinum", 6, 10, [6, 4, 2]),
    element!("Au", "Gold", 6, 11, [3, 2, 1]),
    element!("Hg", "Mercury", 6, 12, [2, 1]),
    element!("Tl", "Thallium", 6, 13, [3, 1]),
    element!("Pb", "Lead", 6, 14, [4, 2]),
    element!("Bi", "Bismuth", 6, 15, [-3], "bismuthide"),
    element!("Po", "Polonium", 6, 16, [-2], "polonide"),
    element!("At", "Astatine", 6, 17, [-1], "astatide"),
];

/// Nonmetals that form binary molecular compounds with each other.
const COVALENT: &[&str] = &["H", "C", "N", "B", "O", "S", "Cl", "F", "P", "Se", "Br", "I"];

/// A polyatomic ion and its atoms, in formula order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyatomicIon {
    pub name: &'static str,
    pub atoms: &'static [(&'static str, u32)],
    pub charge: i64,
}

pub const POLYATOMIC_IONS: &[PolyatomicIon] = &[
    PolyatomicIon { name: "ammonium", atoms: &[("N", 1), ("H", 4)], charge: 1 },
    PolyatomicIon { name: "acetate", atoms: &[("C", 2), ("H", 3), ("O", 2)], charge: -1 },
    PolyatomicIon { name: "bicarbonate", atoms: &[("H", 1), ("C", 1), ("O", 3)], charge: -1 },
    PolyatomicIon { name: "bisulfate", atoms: &[("H", 1), ("S", 1), ("O", 4)], charge: -1 },
    PolyatomicIon { name: "chlorate", atoms: &[("Cl", 1), ("O", 3)], charge: -1 },
    PolyatomicIon { name: "cyanide", atoms: &[("C", 1), ("N", 1)], charge: -1 },
    PolyatomicIon { name: "hydroxide", atoms: &[("O", 1), ("H", 1)], charge: -1 },
    PolyatomicIon { name: "nitrate", atoms: &[("N", 1), ("O", 3)], charge: -1 },
    PolyatomicIon { name: "nitrite", atoms: &[("N", 1), ("O", 2)], charge: -1 },
    PolyatomicIon { name: "perchlorate", atoms: &[("Cl", 1), ("O", 4)], charge: -1 },
    PolyatomicIon { name: "permanganate", atoms: &[("Mn", 1), ("O", 4)], charge: -1 },
    PolyatomicIon { name: "thiocyanate", atoms: &[("S", 1), ("C", 1), ("N", 1)], charge: -1 },
    PolyatomicIon { name: "carbonate", atoms: &[("C", 1), ("O", 3)], charge: -2 },
    PolyatomicIon { name: "chromate", atoms: &[("Cr", 1), ("O", 4)], charge: -2 },
    PolyatomicIon { name: "dichromate", atoms: &[("Cr", 2), ("O", 7)], charge: -2 },
    PolyatomicIon { name: "sulfate", atoms: &[("S", 1), ("O", 4)], charge: -2 },
    PolyatomicIon { name: "sulfite", atoms: &[("S", 1), ("O", 3)], charge: -2 },
    PolyatomicIon { name: "borate", atoms: &[("B", 1), ("O", 3)], charge: -3 },
    PolyatomicIon { name: "citrate", atoms: &[("C", 6), ("H", 5), ("O", 7)], charge: -3 },
    PolyatomicIon { name: "phosphate", atoms: &[("P", 1), ("O", 4)], charge: -3 },
];

const PREFIXES: [&str; 10] = [
    "mono", "di", "tri", "tetra", "penta", "hexa", "hepta", "octa", "nona", "deca",
];

/// Prefixes before "oxide", with the doubled vowel dropped.
const OXIDE_PREFIXES: [&str; 10] = [
    "mon", "di", "tri", "tetr", "pent", "hex", "hept", "oct", "non", "dec",
];

const ROMAN: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

pub fn element(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

fn roman(n: i64) -> &'static str {
    usize::try_from(n - 1)
        .ok()
        .and_then(|i| ROMAN.get(i))
        .copied()
        .unwrap_or("?")
}

fn prefix(n: u32) -> &'static str {
    PREFIXES[(n.clamp(1, 10) - 1) as usize]
}

fn oxide_prefix(n: u32) -> &'static str {
    OXIDE_PREFIXES[(n.clamp(1, 10) - 1) as usize]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Formula rendering
// ---------------------------------------------------------------------------

/// One term of a formula: a single element or a parenthesized group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub atoms: Vec<(&'static str, u32)>,
    pub count: u32,
}

impl Term {
    pub fn element(symbol: &'static str, count: u32) -> Self {
        Self {
            atoms: vec![(symbol, 1)],
            count,
        }
    }

    pub fn ion(ion: &PolyatomicIon, count: u32) -> Self {
        Self {
            atoms: ion.atoms.to_vec(),
            count,
        }
    }

    fn is_group(&self) -> bool {
        self.atoms.len() > 1
    }
}

/// A compound formula as an ordered list of terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula(pub Vec<Term>);

pub fn subscript(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            _ => '₉',
        })
        .collect()
}

fn unicode_atoms(atoms: &[(&str, u32)]) -> String {
    atoms
        .iter()
        .map(|(sym, n)| match n {
            1 => sym.to_string(),
            _ => format!("{sym}{}", subscript(*n)),
        })
        .collect()
}

fn latex_atoms(atoms: &[(&str, u32)]) -> String {
    atoms
        .iter()
        .map(|(sym, n)| match n {
            1 => format!("\\text{{{sym}}}"),
            _ => format!("\\text{{{sym}}}_{{{n}}}"),
        })
        .collect()
}

impl Formula {
    /// Plain text with Unicode subscripts, e.g. `Fe₂(SO₄)₃`.
    pub fn unicode(&self) -> String {
        self.0
            .iter()
            .map(|term| {
                let inner = unicode_atoms(&term.atoms);
                match (term.is_group(), term.count) {
                    (_, 1) => inner,
                    (true, n) => format!("({inner}){}", subscript(n)),
                    (false, _) => {
                        let (sym, _) = term.atoms[0];
                        format!("{sym}{}", subscript(term.count))
                    }
                }
            })
            .collect()
    }

    pub fn latex(&self) -> String {
        self.0
            .iter()
            .map(|term| match (term.is_group(), term.count) {
                (_, 1) => latex_atoms(&term.atoms),
                (true, n) => format!("\\left({}\\right)_{{{n}}}", latex_atoms(&term.atoms)),
                (false, n) => latex_atoms(&[(term.atoms[0].0, n)]),
            })
            .collect::<Vec<_>>()
            .join(" \\, ")
    }
}

/// A formula with its systematic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub formula: Formula,
    pub name: String,
    /// Cation and anion charges, for ionic compounds.
    pub charges: Option<(i64, i64)>,
    /// How the subscripts were found.
    pub reasoning: String,
}

/// Subscripts that balance two charges, reduced to lowest terms.
fn cross(cation: i64, anion: i64) -> (u32, u32) {
    let g = gcd(cation.abs(), anion.abs()).max(1);
    ((anion.abs() / g) as u32, (cation.abs() / g) as u32)
}

fn metal_name(metal: &Element, charge: i64) -> String {
    if metal.charges.len() > 1 {
        format!("{}({})", metal.name, roman(charge))
    } else {
        metal.name.to_string()
    }
}

fn pick<'a, T>(items: &'a [T], rng: &mut dyn RngCore) -> Result<&'a T, DrillError> {
    items
        .choose(rng)
        .ok_or_else(|| DrillError::ConstraintUnsatisfied("empty candidate list".into()))
}

fn pick_charge(e: &Element, rng: &mut dyn RngCore) -> Result<i64, DrillError> {
    pick(e.charges, rng).copied()
}

// ---------------------------------------------------------------------------
// Compound builders
// ---------------------------------------------------------------------------

fn invalid(message: String) -> DrillError {
    DrillError::InvalidCompound(message)
}

fn charge_list(e: &Element) -> String {
    e.charges
        .iter()
        .map(|c| format!("{c:+}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_charge(e: &Element, charge: i64) -> Result<(), DrillError> {
    if e.charges.contains(&charge) {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} does not form a {charge:+} ion (it forms {})",
            e.name,
            charge_list(e)
        )))
    }
}

/// The element's charge when it only forms one ion.
pub fn sole_charge(e: &Element) -> Result<i64, DrillError> {
    match e.charges {
        [only] => Ok(*only),
        _ => Err(invalid(format!(
            "{} forms more than one ion ({}); choose a charge",
            e.name,
            charge_list(e)
        ))),
    }
}

/// Finds an element by symbol, then by symbol ignoring case, then by
/// element or anion name.
pub fn lookup_element(query: &str) -> Result<&'static Element, DrillError> {
    let query = query.trim();
    element(query)
        .or_else(|| ELEMENTS.iter().find(|e| e.symbol.eq_ignore_ascii_case(query)))
        .or_else(|| {
            ELEMENTS.iter().find(|e| {
                e.name.eq_ignore_ascii_case(query)
                    || e.anion.is_some_and(|a| a.eq_ignore_ascii_case(query))
            })
        })
        .ok_or_else(|| invalid(format!("unknown element: {query}")))
}

pub fn polyatomic_ion(name: &str) -> Option<&'static PolyatomicIon> {
    let name = name.trim();
    POLYATOMIC_IONS
        .iter()
        .find(|ion| ion.name.eq_ignore_ascii_case(name))
}

/// A metal cation of the given charge with a monatomic nonmetal anion.
pub fn ionic_from(
    metal: &Element,
    metal_charge: i64,
    nonmetal: &Element,
) -> Result<Compound, DrillError> {
    if !metal.is_metal() {
        return Err(invalid(format!("{} is not a metal", metal.name)));
    }
    if nonmetal.is_metal() {
        return Err(invalid(format!("{} is not a nonmetal", nonmetal.name)));
    }
    check_charge(metal, metal_charge)?;
    let n_charge = sole_charge(nonmetal)?;
    let (m_sub, n_sub) = cross(metal_charge, n_charge);
    let anion = nonmetal.anion.unwrap_or(nonmetal.name);

    Ok(Compound {
        formula: Formula(vec![
            Term::element(metal.symbol, m_sub),
            Term::element(nonmetal.symbol, n_sub),
        ]),
        name: format!("{} {anion}", metal_name(metal, metal_charge)),
        charges: Some((metal_charge, n_charge)),
        reasoning: format!(
            "{} carries {metal_charge:+} and {} carries {n_charge:+}; crossing the charges \
             balances them.",
            metal.symbol, nonmetal.symbol
        ),
    })
}

/// A metal cation with a monatomic anion. Easy keeps to metals with a
/// single charge so no Roman numeral is needed.
pub fn ionic(difficulty: Difficulty, rng: &mut dyn RngCore) -> Result<Compound, DrillError> {
    let metals: Vec<&Element> = ELEMENTS
        .iter()
        .filter(|e| e.is_metal())
        .filter(|e| difficulty != Difficulty::Easy || e.charges.len() == 1)
        .collect();
    let nonmetals: Vec<&Element> = ELEMENTS.iter().filter(|e| !e.is_metal()).collect();
    let metal = *pick(&metals, rng)?;
    let nonmetal = *pick(&nonmetals, rng)?;
    let m_charge = pick_charge(metal, rng)?;
    ionic_from(metal, m_charge, nonmetal)
}

/// A binary molecular compound with the given atom counts, written and
/// named lower group first and, within a group, heavier element first.
/// Counts are used as given, from 1 to 10.
pub fn covalent_from(a: &Element, n_a: u32, b: &Element, n_b: u32) -> Result<Compound, DrillError> {
    for e in [a, b] {
        if !COVALENT.contains(&e.symbol) {
            return Err(invalid(format!(
                "{} does not form binary molecular compounds",
                e.name
            )));
        }
    }
    if a.symbol == b.symbol {
        return Err(invalid(format!("{} cannot bond with itself here", a.name)));
    }
    for n in [n_a, n_b] {
        if !(1..=10).contains(&n) {
            return Err(invalid(format!("atom count {n} is outside 1 to 10")));
        }
    }

    let a_first = a.group < b.group || (a.group == b.group && a.period > b.period);
    let ((first, n1), (second, n2)) = if a_first {
        ((a, n_a), (b, n_b))
    } else {
        ((b, n_b), (a, n_a))
    };

    let first_term = if n1 == 1 {
        first.name.to_lowercase()
    } else {
        format!("{}{}", prefix(n1), first.name.to_lowercase())
    };
    let anion = second.anion.unwrap_or(second.name);
    let second_term = if second.symbol == "O" {
        format!("{}{anion}", oxide_prefix(n2))
    } else {
        format!("{}{anion}", prefix(n2))
    };

    Ok(Compound {
        formula: Formula(vec![
            Term::element(first.symbol, n1),
            Term::element(second.symbol, n2),
        ]),
        name: capitalize(&format!("{first_term} {second_term}")),
        charges: None,
        reasoning: "Molecular compounds name every atom count with a Greek prefix; the \
                    first element drops \"mono\"."
            .to_string(),
    })
}

/// Two covalent nonmetals with counts from 1 to 4 in lowest terms.
pub fn covalent(rng: &mut dyn RngCore) -> Result<Compound, DrillError> {
    let picked: Vec<&Element> = COVALENT
        .choose_multiple(rng, 2)
        .filter_map(|s| element(s))
        .collect();
    let [a, b] = picked.as_slice() else {
        return Err(DrillError::ConstraintUnsatisfied("covalent pair".into()));
    };
    let s_a: u32 = rng.gen_range(1..=4);
    let s_b: u32 = rng.gen_range(1..=4);
    let g = gcd(s_a.into(), s_b.into()) as u32;
    covalent_from(a, s_a / g, b, s_b / g)
}

/// A polyatomic ion with a monatomic counter-ion of the given charge.
/// Ammonium pairs with a nonmetal anion, every other ion with a metal.
pub fn polyatomic_from(
    ion: &PolyatomicIon,
    partner: &Element,
    partner_charge: i64,
) -> Result<Compound, DrillError> {
    if ion.charge > 0 && partner.is_metal() {
        return Err(invalid(format!("{} pairs with a nonmetal, not {}", ion.name, partner.name)));
    }
    if ion.charge < 0 && !partner.is_metal() {
        return Err(invalid(format!("{} pairs with a metal, not {}", ion.name, partner.name)));
    }
    check_charge(partner, partner_charge)?;

    let (formula, name, charges) = if ion.charge > 0 {
        let (ion_sub, partner_sub) = cross(ion.charge, partner_charge);
        let anion = partner.anion.unwrap_or(partner.name);
        (
            Formula(vec![
                Term::ion(ion, ion_sub),
                Term::element(partner.symbol, partner_sub),
            ]),
            format!("{} {anion}", ion.name),
            (ion.charge, partner_charge),
        )
    } else {
        let (partner_sub, ion_sub) = cross(partner_charge, ion.charge);
        (
            Formula(vec![
                Term::element(partner.symbol, partner_sub),
                Term::ion(ion, ion_sub),
            ]),
            format!("{} {}", metal_name(partner, partner_charge), ion.name),
            (partner_charge, ion.charge),
        )
    };

    Ok(Compound {
        formula,
        name: capitalize(&name),
        charges: Some(charges),
        reasoning: format!(
            "{} carries {:+} and {} carries {partner_charge:+}; the polyatomic ion keeps its \
             own subscripts and is bracketed when more than one is needed.",
            ion.name, ion.charge, partner.symbol
        ),
    })
}

pub fn polyatomic(rng: &mut dyn RngCore) -> Result<Compound, DrillError> {
    let ion = pick(POLYATOMIC_IONS, rng)?;
    let pool: Vec<&Element> = ELEMENTS
        .iter()
        .filter(|e| e.is_metal() == (ion.charge < 0))
        .collect();
    let partner = *pick(&pool, rng)?;
    let partner_charge = pick_charge(partner, rng)?;
    polyatomic_from(ion, partner, partner_charge)
}

// ---------------------------------------------------------------------------
// Formula explorer
// ---------------------------------------------------------------------------

/// A compound described by its parts rather than drawn at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaRequest {
    /// Two nonmetals written as symbol and count, e.g. `N2` and `O4`.
    Covalent { first: String, second: String },
    /// A cation and an anion, either of which may be a polyatomic ion.
    /// `charge` picks the cation's charge when it forms more than one.
    Ionic {
        cation: String,
        charge: Option<i64>,
        anion: String,
    },
}

/// Splits `Cl2` into the element and its count; a bare symbol counts once.
fn parse_term(term: &str) -> Result<(&'static Element, u32), DrillError> {
    let term = term.trim();
    let split = term.find(|c: char| c.is_ascii_digit()).unwrap_or(term.len());
    let (symbol, digits) = term.split_at(split);
    let count = if digits.is_empty() {
        1
    } else {
        digits
            .parse()
            .map_err(|_| invalid(format!("bad atom count in {term}")))?
    };
    Ok((lookup_element(symbol)?, count))
}

fn cation_charge(e: &Element, charge: Option<i64>) -> Result<i64, DrillError> {
    match charge {
        Some(c) => Ok(c),
        None => sole_charge(e),
    }
}

/// Builds the compound a request describes.
pub fn explore(request: &FormulaRequest) -> Result<Compound, DrillError> {
    match request {
        FormulaRequest::Covalent { first, second } => {
            let (a, n_a) = parse_term(first)?;
            let (b, n_b) = parse_term(second)?;
            covalent_from(a, n_a, b, n_b)
        }
        FormulaRequest::Ionic {
            cation,
            charge,
            anion,
        } => match (polyatomic_ion(cation), polyatomic_ion(anion)) {
            (Some(_), Some(_)) => Err(invalid(
                "pair a polyatomic ion with a single element".to_string(),
            )),
            (Some(ion), None) => {
                if ion.charge < 0 {
                    return Err(invalid(format!("{} is an anion", ion.name)));
                }
                if charge.is_some_and(|c| c != ion.charge) {
                    return Err(invalid(format!(
                        "{} always carries {:+}",
                        ion.name, ion.charge
                    )));
                }
                let partner = lookup_element(anion)?;
                polyatomic_from(ion, partner, sole_charge(partner)?)
            }
            (None, Some(ion)) => {
                if ion.charge > 0 {
                    return Err(invalid(format!("{} is a cation", ion.name)));
                }
                let metal = lookup_element(cation)?;
                if !metal.is_metal() {
                    return Err(invalid(format!("{} is not a metal", metal.name)));
                }
                polyatomic_from(ion, metal, cation_charge(metal, *charge)?)
            }
            (None, None) => {
                let metal = lookup_element(cation)?;
                let nonmetal = lookup_element(anion)?;
                if !metal.is_metal() {
                    return Err(invalid(format!("{} is not a metal", metal.name)));
                }
                ionic_from(metal, cation_charge(metal, *charge)?, nonmetal)
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct Compounds {
    /// Offer polyatomic compounds in the mixed pool below Hard.
    pub include_polyatomic: bool,
}

impl Compounds {
    pub fn new(include_polyatomic: bool) -> Self {
        Self { include_polyatomic }
    }

    fn build(
        &self,
        kind: &str,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Compound, DrillError> {
        match kind {
            "ionic" => ionic(difficulty, rng),
            "covalent" => covalent(rng),
            "polyatomic" => polyatomic(rng),
            _ => {
                let pool = if difficulty == Difficulty::Hard || self.include_polyatomic {
                    3
                } else {
                    2
                };
                match rng.gen_range(0..pool) {
                    0 => ionic(difficulty, rng),
                    1 => covalent(rng),
                    _ => polyatomic(rng),
                }
            }
        }
    }
}

impl ProblemGenerator for Compounds {
    fn topic(&self) -> Topic {
        Topic::Compounds
    }

    fn kinds(&self) -> &'static [&'static str] {
        KINDS
    }

    fn difficulties(&self) -> &'static [Difficulty] {
        DIFFICULTIES
    }

    fn generate(
        &self,
        kind: &str,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Problem, DrillError> {
        self.ensure_supported(kind, difficulty)?;
        let compound = self.build(kind, difficulty, rng)?;
        let question = format!("Name the compound {}.", compound.formula.unicode());
        let answer = ExpectedAnswer::Text {
            value: compound.name,
            label: "Name".to_string(),
        };
        Ok(
            Problem::new(Topic::Compounds, kind, difficulty, question, vec![answer])
                .with_latex(compound.formula.latex())
                .with_solution(compound.reasoning),
        )
    }
}
