use crate::compute::{Engine, RegisterState, DIGITS};
use crate::search::config::SearchOptions;
use crate::search::range::InputRange;
use crate::store::Instruction;
use rayon::prelude::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Every register state reachable after some prefix of the program, each
/// paired with the extreme inputs known to reach it.
///
/// Keys are unique; when two transitions land on the same state their
/// ranges are merged. A frontier is consumed by [`Frontier::step`] and never
/// updated in place across instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    states: HashMap<RegisterState, InputRange>,
}

impl Frontier {
    /// The frontier before any instruction: all registers zero, empty input.
    pub fn initial() -> Self {
        let mut states = HashMap::with_capacity(1);
        states.insert(RegisterState::ZERO, InputRange::empty());
        Self { states }
    }

    pub fn len(&self) -> usize { self.states.len() }
    pub fn is_empty(&self) -> bool { self.states.is_empty() }
    pub fn get(&self, state: &RegisterState) -> Option<&InputRange> { self.states.get(state) }

    pub fn iter(&self) -> impl Iterator<Item = (&RegisterState, &InputRange)> {
        self.states.iter()
    }

    /// Inserts `range` for `state`, merging with any range already stored.
    /// Returns `true` if the state was already present.
    pub fn insert_merge(&mut self, state: RegisterState, range: InputRange) -> bool {
        insert_merge(&mut self.states, state, range)
    }

    /// Number of (state, range) pairs `instruction` produces from this
    /// frontier before collisions are merged.
    pub fn fan_out(&self, instruction: &Instruction) -> usize {
        match instruction {
            Instruction::Inp { .. } => self.len() * DIGITS.count(),
            Instruction::Binary { .. } => self.len(),
        }
    }

    /// Applies one instruction to every entry and returns the next frontier.
    ///
    /// Reads fan each entry out into nine successors, one per digit, with the
    /// digit appended to both ends of the range. Binary instructions map each
    /// state through the interpreter and carry the range over unchanged.
    /// Collisions are merged in both cases.
    ///
    /// Frontiers with at least `options.parallel_threshold` entries are
    /// expanded with rayon: each worker folds into its own map and the maps
    /// are reduced with the same merge rule, so the result does not depend on
    /// the path taken.
    pub fn step(self, instruction: &Instruction, options: &SearchOptions) -> Frontier {
        if self.len() >= options.parallel_threshold {
            self.step_parallel(instruction)
        } else {
            self.step_sequential(instruction)
        }
    }

    fn step_sequential(self, instruction: &Instruction) -> Frontier {
        let mut next = HashMap::with_capacity(self.fan_out(instruction));
        for (state, range) in self.states {
            successors(state, range, instruction, |s, r| {
                insert_merge(&mut next, s, r);
            });
        }
        Frontier { states: next }
    }

    fn step_parallel(self, instruction: &Instruction) -> Frontier {
        let states = self
            .states
            .into_par_iter()
            .fold(HashMap::new, |mut acc, (state, range)| {
                successors(state, range, instruction, |s, r| {
                    insert_merge(&mut acc, s, r);
                });
                acc
            })
            .reduce(HashMap::new, merge_maps);
        Frontier { states }
    }

    /// Keeps the states whose `z` register is zero and reduces their ranges
    /// into a single pair.
    ///
    /// Returns `None` when no state has `z == 0`: there is no valid input,
    /// which must not be confused with a real answer.
    pub fn solutions(&self) -> Option<InputRange> {
        self.states
            .iter()
            .filter(|(state, _)| state.z == 0)
            .map(|(_, range)| range)
            .fold(None, |acc: Option<InputRange>, range| match acc {
                None => Some(range.clone()),
                Some(mut best) => {
                    best.merge_from(range.clone());
                    Some(best)
                }
            })
    }
}

impl FromIterator<(RegisterState, InputRange)> for Frontier {
    fn from_iter<I: IntoIterator<Item = (RegisterState, InputRange)>>(iter: I) -> Self {
        let mut frontier = Frontier::default();
        for (state, range) in iter {
            frontier.insert_merge(state, range);
        }
        frontier
    }
}

impl IntoIterator for Frontier {
    type Item = (RegisterState, InputRange);
    type IntoIter = std::collections::hash_map::IntoIter<RegisterState, InputRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

/// Emits every (state, range) pair that `instruction` produces from one
/// frontier entry.
#[inline(always)]
fn successors(
    state: RegisterState,
    range: InputRange,
    instruction: &Instruction,
    mut emit: impl FnMut(RegisterState, InputRange),
) {
    match *instruction {
        Instruction::Inp { dest } => {
            for digit in DIGITS {
                emit(Engine::apply_read(&state, dest, digit), range.extend(digit));
            }
        }
        Instruction::Binary { op, dest, src } => {
            emit(Engine::apply_binary(&state, op, dest, src), range);
        }
    }
}

#[inline(always)]
fn insert_merge(map: &mut HashMap<RegisterState, InputRange>, state: RegisterState, range: InputRange) -> bool {
    match map.entry(state) {
        Entry::Occupied(mut slot) => {
            slot.get_mut().merge_from(range);
            true
        }
        Entry::Vacant(slot) => {
            slot.insert(range);
            false
        }
    }
}

fn merge_maps(
    a: HashMap<RegisterState, InputRange>,
    b: HashMap<RegisterState, InputRange>,
) -> HashMap<RegisterState, InputRange> {
    // Drain the smaller map into the larger one.
    let (mut into, from) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for (state, range) in from {
        insert_merge(&mut into, state, range);
    }
    into
}
