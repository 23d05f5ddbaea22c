pub mod http_inference_client;
