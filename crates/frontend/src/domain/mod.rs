pub mod a001_vendor_orders;
