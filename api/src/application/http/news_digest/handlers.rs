pub mod generate_digest;
