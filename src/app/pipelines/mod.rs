pub mod model_pipeline;

pub use model_pipeline::ModelPricePipeline;
