// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    enhanced_output_path,
    load_seeds_from_file,
    load_seeds_from_source,
    parse_seed_list,
    report_output_path,
};

// Re-export pipeline functionality from sprout-core
pub use sprout_core::pipeline::{
    execute_discovery, DiscoveryOptions, DiscoveryProgressCallback, ExpansionStrategy,
};
