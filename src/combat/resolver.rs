//! Combat resolution.
//!
//! [`resolve`] is the single combat routine. It reads the board and
//! returns a [`CombatOutcome`] without mutating anything, which makes it
//! the simulation used by move search. The live path runs the same
//! routine and then hands the outcome to [`apply`].
//!
//! ## Duel values
//!
//! For each direction in combat order (top, right, bottom, left) whose
//! target cell holds an opposing card:
//!
//! 1. Attacker value is the placed card's attack facing the target.
//! 2. Defender value is the target's attack facing back, plus one per
//!    active buff on the target.
//! 3. Element: attacker beats defender → defender −1; otherwise defender
//!    beats attacker → defender +1 (never for a dark defender against a
//!    light attacker).
//! 4. Resistances apply to both cards against the other's kind.
//! 5. The target is captured iff attacker value > defender value.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::board::{Board, Direction, Pos};
use crate::cards::{Card, CardCatalog, CardKind, Element};
use crate::core::{Color, ColorMap, EngineError, RangeMode, Side};

/// One captured card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Cell of the captured card.
    pub pos: Pos,
    /// Direction from the attacker to the captured card.
    pub direction: Direction,
}

/// Result of resolving one placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// Cell of the placed card.
    pub attacker: Pos,

    /// Color of the placed card.
    pub color: Color,

    /// Captured cards, in combat order.
    pub captured: SmallVec<[Capture; 4]>,

    /// Every direction in which an opposing card was compared.
    pub attacked: SmallVec<[Direction; 4]>,
}

impl CombatOutcome {
    /// Number of captured cards.
    #[must_use]
    pub fn capture_count(&self) -> u8 {
        self.captured.len() as u8
    }

    /// Directions of the captured cards.
    #[must_use]
    pub fn captured_directions(&self) -> SmallVec<[Direction; 4]> {
        self.captured.iter().map(|c| c.direction).collect()
    }
}

/// Attack distance of a card under a range mode.
///
/// Ranged cards always reach two cells; magic cards reach two cells only
/// in `RangeMode::Ranged`.
#[must_use]
pub const fn reach(kind: CardKind, range: RangeMode) -> usize {
    match (kind, range) {
        (CardKind::Ranged, _) | (CardKind::Magic, RangeMode::Ranged) => 2,
        _ => 1,
    }
}

/// Compute the attacker and defender values of one duel.
///
/// `direction` points from the attacker to the defender.
#[must_use]
pub fn duel_values(
    attacker: &Card,
    defender: &Card,
    direction: Direction,
    defender_buffs: i32,
) -> (i32, i32) {
    let mut attack = i32::from(attacker.attack.facing(direction));
    let mut defense = i32::from(defender.attack.facing(direction.opposite())) + defender_buffs;

    if attacker.element.beats(defender.element) {
        defense -= 1;
    } else if defender.element.beats(attacker.element)
        && !(defender.element == Element::Dark && attacker.element == Element::Light)
    {
        defense += 1;
    }

    attack += attacker.resistance.bonus_against(defender.kind);
    defense += defender.resistance.bonus_against(attacker.kind);

    (attack, defense)
}

/// Resolve combat for the card at `pos` without mutating the board.
///
/// Fails with `InvariantViolation` if `pos` holds no card or a card on
/// the board is missing from the catalog.
pub fn resolve(
    board: &Board,
    catalog: &CardCatalog,
    pos: Pos,
    range: RangeMode,
) -> Result<CombatOutcome, EngineError> {
    let placed = board
        .card_at(pos)
        .ok_or_else(|| EngineError::invariant(format!("no card to resolve at {pos}")))?;
    let attacker = catalog.require(placed.card_id)?;
    let distance = reach(attacker.kind, range);

    let mut outcome = CombatOutcome {
        attacker: pos,
        color: placed.color,
        captured: SmallVec::new(),
        attacked: SmallVec::new(),
    };

    for direction in Direction::ALL {
        let Some(target) = pos.step(direction, distance) else {
            continue;
        };
        let Some(defender_card) = board.card_at(target) else {
            continue;
        };
        if defender_card.color == placed.color {
            continue;
        }

        let defender = catalog.require(defender_card.card_id)?;
        let (attack, defense) =
            duel_values(attacker, defender, direction, defender_card.buff_count());

        outcome.attacked.push(direction);
        if attack > defense {
            outcome.captured.push(Capture {
                pos: target,
                direction,
            });
        }
    }

    Ok(outcome)
}

/// Apply a resolved outcome to the live board and scores.
///
/// Each captured card flips to the attacker's color; the attacker gains a
/// point and the previous owner loses one. Every capture is checked before
/// the first flip, so an error leaves the board and scores as they were.
pub fn apply(
    board: &mut Board,
    sides: &mut ColorMap<Side>,
    outcome: &CombatOutcome,
) -> Result<(), EngineError> {
    let loser = outcome.color.opponent();
    for capture in &outcome.captured {
        let card = board.card_at(capture.pos).ok_or_else(|| {
            EngineError::invariant(format!("captured cell {} holds no card", capture.pos))
        })?;
        if card.color != loser {
            return Err(EngineError::invariant(format!(
                "{} already belongs to {}",
                capture.pos, outcome.color
            )));
        }
    }
    let flips = outcome.captured.len() as u32;
    if sides[loser].score < flips {
        return Err(EngineError::invariant(format!(
            "{loser} score would drop below zero"
        )));
    }

    for capture in &outcome.captured {
        if let Some(card) = board.card_at_mut(capture.pos) {
            card.color = outcome.color;
        }
        debug!(
            pos = %capture.pos,
            direction = ?capture.direction,
            from = %loser,
            to = %outcome.color,
            "card captured"
        );
    }
    sides[loser].score -= flips;
    sides[outcome.color].score += flips;
    Ok(())
}
