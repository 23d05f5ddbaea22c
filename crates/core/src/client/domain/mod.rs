pub mod inference_client;
