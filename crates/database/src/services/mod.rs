pub mod order;
pub mod trip;
