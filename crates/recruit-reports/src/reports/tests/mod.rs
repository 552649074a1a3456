mod common;
mod normalizer;
mod projector;
