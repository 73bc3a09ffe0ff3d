use glam::DVec2;
use once_cell::sync::Lazy;
use regex::Regex;

// A move command followed by its first x,y operand pair. Operands are plain
// decimals with an optional minus and exactly one separator character.
static FIRST_MOVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[Mm]\s*(-?[\d.]+)[,\s](-?[\d.]+)").unwrap());

/// Representative point of a path: the target of its first move command.
///
/// This is an approximation. It is only meaningful for compact shapes whose
/// first sub-path is the main outline, and a relative `m` is read as if it
/// were absolute (which it is when it starts the path). Returns `None` when
/// no move command with two numeric operands can be found.
pub fn extract_anchor(d: &str) -> Option<DVec2> {
    let caps = FIRST_MOVE.captures(d)?;
    let x = caps[1].parse().ok()?;
    let y = caps[2].parse().ok()?;
    Some(DVec2::new(x, y))
}
