pub mod relay_pipeline;
