pub mod delivery_pipeline;
