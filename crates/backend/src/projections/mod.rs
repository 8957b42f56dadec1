pub mod p900_warehouse_structure;
