pub mod crew;
pub mod order;
pub mod route;
pub mod station;
pub mod ticket;
pub mod train;
pub mod train_type;
pub mod trip;
pub mod trip_crew;
