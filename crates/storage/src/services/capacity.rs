use std::collections::HashMap;

use crate::models::Program;

use super::allocation::AllocationError;

/// Remaining seats per program for a single allocation run.
#[derive(Debug, Clone, Default)]
pub struct CapacityLedger {
    remaining: HashMap<i64, u32>,
}

impl CapacityLedger {
    pub fn from_programs<'a>(programs: impl IntoIterator<Item = &'a Program>) -> Self {
        let remaining = programs
            .into_iter()
            .map(|program| (program.program_id, program.total_capacity()))
            .collect();

        Self { remaining }
    }

    /// Seats left on a program. Programs the ledger does not know have none.
    pub fn remaining(&self, program_id: i64) -> u32 {
        self.remaining.get(&program_id).copied().unwrap_or(0)
    }

    pub fn has_seat(&self, program_id: i64) -> bool {
        self.remaining(program_id) > 0
    }

    pub fn consume_one(&mut self, program_id: i64) -> Result<(), AllocationError> {
        match self.remaining.get_mut(&program_id) {
            Some(seats) if *seats > 0 => {
                *seats -= 1;
                Ok(())
            }
            _ => Err(AllocationError::InsufficientCapacity { program_id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(program_id: i64, budget_seats: i32, fee_seats: i32) -> Program {
        Program {
            program_id,
            faculty_id: 1,
            faculty_name: "Faculty of Letters".to_string(),
            name: format!("Program {program_id}"),
            budget_seats,
            fee_seats,
        }
    }

    #[test]
    fn test_ledger_seeds_combined_capacity() {
        let programs = vec![program(1, 2, 1), program(2, 0, 0)];
        let ledger = CapacityLedger::from_programs(&programs);

        assert_eq!(ledger.remaining(1), 3);
        assert_eq!(ledger.remaining(2), 0);
        assert!(!ledger.has_seat(2));
    }

    #[test]
    fn test_unknown_program_has_no_capacity() {
        let ledger = CapacityLedger::from_programs(&[program(1, 1, 0)]);
        assert_eq!(ledger.remaining(42), 0);
        assert!(!ledger.has_seat(42));
    }

    #[test]
    fn test_consume_until_exhausted() {
        let mut ledger = CapacityLedger::from_programs(&[program(1, 1, 1)]);

        ledger.consume_one(1).unwrap();
        ledger.consume_one(1).unwrap();
        assert_eq!(ledger.remaining(1), 0);

        match ledger.consume_one(1) {
            Err(AllocationError::InsufficientCapacity { program_id: 1 }) => {}
            other => panic!("expected insufficient capacity, got {other:?}"),
        }
        assert_eq!(ledger.remaining(1), 0);
    }

    #[test]
    fn test_consume_unknown_program_fails() {
        let mut ledger = CapacityLedger::default();
        assert!(matches!(
            ledger.consume_one(5),
            Err(AllocationError::InsufficientCapacity { program_id: 5 })
        ));
    }
}
