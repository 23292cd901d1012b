pub mod ollama_client;
