//! Textual instruction source.
//!
//! The grammar is a `;`-separated list of statements:
//!
//! ```text
//! qreg q[<uint>]      set the qubit count
//! creg c[<uint>]      set the classical bit count
//! <gate> q[<uint>]    gate ∈ {h, x, z, s, sdg, t, tdg}
//! ```
//!
//! Statements that do not match one of these shapes are skipped without
//! error.

use tracing::{debug, instrument};

use qpad_ir::{CircuitModel, QubitId};

use crate::keyword::GateKeyword;

/// A recognised statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Statement {
    Qreg(u32),
    Creg(u32),
    Gate(GateKeyword, u32),
}

/// Parse a textual program into a circuit.
///
/// The circuit is created at the first gate statement using the register
/// sizes declared up to that point; declarations after it are ignored. Gate
/// statements seen while no qubits are declared are skipped, as are gates
/// whose index is out of range. A program without gate statements produces
/// an empty circuit sized by its declarations.
///
/// Parsing never fails. `None` means no qubit register was ever in effect,
/// so there is no circuit to build.
#[instrument(skip(source), fields(len = source.len()))]
pub fn parse_text(source: &str) -> Option<CircuitModel> {
    let mut num_qubits = 0;
    let mut num_clbits = 0;
    let mut circuit: Option<CircuitModel> = None;

    for (position, raw) in source.split(';').enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let Some(statement) = parse_statement(text) else {
            debug!(position, statement = text, "skipping unrecognised statement");
            continue;
        };

        match statement {
            Statement::Qreg(_) | Statement::Creg(_) if circuit.is_some() => {
                debug!(position, statement = text, "ignoring declaration after first gate");
            }
            Statement::Qreg(n) => num_qubits = n,
            Statement::Creg(n) => num_clbits = n,
            Statement::Gate(keyword, index) => {
                let target = match &mut circuit {
                    Some(c) => c,
                    slot @ None => match CircuitModel::new(num_qubits, num_clbits) {
                        Ok(c) => slot.insert(c),
                        Err(e) => {
                            debug!(position, statement = text, error = %e, "skipping gate");
                            continue;
                        }
                    },
                };
                if let Err(e) = keyword.apply(target, QubitId(index)) {
                    debug!(position, statement = text, error = %e, "skipping gate");
                }
            }
        }
    }

    circuit.or_else(|| CircuitModel::new(num_qubits, num_clbits).ok())
}

fn parse_statement(text: &str) -> Option<Statement> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?;
    let arg = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    match head {
        "qreg" => bracket_index(arg, "q").map(Statement::Qreg),
        "creg" => bracket_index(arg, "c").map(Statement::Creg),
        keyword => {
            let keyword = keyword.parse::<GateKeyword>().ok()?;
            bracket_index(arg, "q").map(|i| Statement::Gate(keyword, i))
        }
    }
}

/// Extract `N` from `<register>[N]`.
fn bracket_index(token: &str, register: &str) -> Option<u32> {
    token
        .strip_prefix(register)?
        .strip_prefix('[')?
        .strip_suffix(']')?
        .parse()
        .ok()
}
