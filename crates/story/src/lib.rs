pub mod ghost_list;
