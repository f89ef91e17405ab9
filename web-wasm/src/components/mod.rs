pub mod header;
pub mod loading_spinner;
pub mod rejection_view;
pub mod results_display;
pub mod sample_results;
pub mod upload_area;
