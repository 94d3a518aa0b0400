mod common;
mod editor;
mod normalizer;
