use thiserror::Error;

/// Seat layout of a train: how many cars it pulls and how many places each
/// car holds. Seat and car numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatPlan {
    pub cargo_num: i32,
    pub places_in_cargo: i32,
}

impl SeatPlan {
    pub fn new(cargo_num: i32, places_in_cargo: i32) -> Self {
        Self {
            cargo_num,
            places_in_cargo,
        }
    }

    /// Total number of places on the train.
    pub fn capacity(&self) -> i64 {
        self.cargo_num as i64 * self.places_in_cargo as i64
    }

    pub fn validate_cargo(&self, cargo: i32) -> Result<(), BookingError> {
        if cargo < 1 || cargo > self.cargo_num {
            return Err(BookingError::CargoOutOfRange {
                cargo,
                cargo_num: self.cargo_num,
            });
        }
        Ok(())
    }

    pub fn validate_seat(&self, seat: i32) -> Result<(), BookingError> {
        if seat < 1 || seat > self.places_in_cargo {
            return Err(BookingError::SeatOutOfRange {
                seat,
                places_in_cargo: self.places_in_cargo,
            });
        }
        Ok(())
    }

    /// Range-checks a requested place. Uniqueness against already sold
    /// tickets is the persistence layer's job.
    pub fn validate(&self, cargo: i32, seat: i32) -> Result<(), BookingError> {
        self.validate_cargo(cargo)?;
        self.validate_seat(seat)
    }
}

/// Why a requested (cargo, seat) pair cannot be booked. Messages are
/// user-facing and rendered verbatim in API error bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Cargo must be in range [1, {cargo_num}]")]
    CargoOutOfRange { cargo: i32, cargo_num: i32 },
    #[error("Seat must be in range [1, {places_in_cargo}]")]
    SeatOutOfRange { seat: i32, places_in_cargo: i32 },
    #[error("Seat {seat} in cargo {cargo} for this trip is already booked.")]
    SeatTaken { cargo: i32, seat: i32 },
}

impl BookingError {
    /// Name of the request field the error should be reported under.
    pub fn field(&self) -> &'static str {
        match self {
            BookingError::CargoOutOfRange { .. } => "cargo",
            BookingError::SeatOutOfRange { .. } | BookingError::SeatTaken { .. } => "seat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity() {
        assert_eq!(SeatPlan::new(5, 20).capacity(), 100);
        assert_eq!(SeatPlan::new(1, 1).capacity(), 1);
    }

    #[test]
    fn test_cargo_bounds() {
        let plan = SeatPlan::new(5, 20);
        assert!(plan.validate_cargo(1).is_ok());
        assert!(plan.validate_cargo(5).is_ok());
        assert_eq!(
            plan.validate_cargo(0),
            Err(BookingError::CargoOutOfRange {
                cargo: 0,
                cargo_num: 5
            })
        );
        assert_eq!(
            plan.validate_cargo(6),
            Err(BookingError::CargoOutOfRange {
                cargo: 6,
                cargo_num: 5
            })
        );
    }

    #[test]
    fn test_seat_bounds() {
        let plan = SeatPlan::new(5, 20);
        assert!(plan.validate_seat(1).is_ok());
        assert!(plan.validate_seat(20).is_ok());
        assert!(plan.validate_seat(0).is_err());
        assert!(plan.validate_seat(21).is_err());
    }

    #[test]
    fn test_validate_checks_cargo_first() {
        // Both out of range: the cargo error wins.
        let plan = SeatPlan::new(3, 10);
        assert_eq!(
            plan.validate(4, 11),
            Err(BookingError::CargoOutOfRange {
                cargo: 4,
                cargo_num: 3
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let plan = SeatPlan::new(5, 20);
        assert_eq!(
            plan.validate(6, 1).unwrap_err().to_string(),
            "Cargo must be in range [1, 5]"
        );
        assert_eq!(
            plan.validate(3, 25).unwrap_err().to_string(),
            "Seat must be in range [1, 20]"
        );
        assert_eq!(
            BookingError::SeatTaken { cargo: 3, seat: 15 }.to_string(),
            "Seat 15 in cargo 3 for this trip is already booked."
        );
    }

    #[test]
    fn test_error_fields() {
        assert_eq!(
            BookingError::CargoOutOfRange {
                cargo: 9,
                cargo_num: 5
            }
            .field(),
            "cargo"
        );
        assert_eq!(
            BookingError::SeatOutOfRange {
                seat: 99,
                places_in_cargo: 20
            }
            .field(),
            "seat"
        );
        assert_eq!(BookingError::SeatTaken { cargo: 1, seat: 1 }.field(), "seat");
    }
}
