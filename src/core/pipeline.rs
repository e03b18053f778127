pub use crate::app::pipelines::delivery_pipeline::DeliveryPipeline;
