pub mod bar_chart;
pub mod data_table;
pub mod date_input;
pub mod stat_card;
