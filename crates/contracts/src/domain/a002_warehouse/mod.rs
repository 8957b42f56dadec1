pub mod aggregate;

pub use aggregate::{
    normalize_code, same_code,
    Location, LocationDto, LocationId, Warehouse, WarehouseDto, WarehouseId, Zone, ZoneDto, ZoneId,
};
