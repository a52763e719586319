pub mod site_map;
