pub mod round_trip;
