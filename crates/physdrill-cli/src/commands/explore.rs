//! The `physdrill explore` command.

use anyhow::{bail, Result};

use physdrill_core::generators::compounds::{explore, FormulaRequest};

pub fn execute(
    cation: Option<String>,
    charge: Option<i64>,
    anion: Option<String>,
    first: Option<String>,
    second: Option<String>,
) -> Result<()> {
    let request = match (cation, anion, first, second) {
        (Some(cation), Some(anion), None, None) => FormulaRequest::Ionic {
            cation,
            charge,
            anion,
        },
        (None, None, Some(first), Some(second)) => {
            if charge.is_some() {
                bail!("--charge applies to ionic compounds only");
            }
            FormulaRequest::Covalent { first, second }
        }
        _ => bail!("give --cation and --anion, or --first and --second"),
    };

    let compound = explore(&request)?;
    println!("Formula: {}", compound.formula.unicode());
    println!("LaTeX:   {}", compound.formula.latex());
    println!("Name:    {}", compound.name);
    if let Some((cation, anion)) = compound.charges {
        println!("Charges: {cation:+} / {anion:+}");
    }
    println!("\n{}", compound.reasoning);

    Ok(())
}
