mod binary_test;
mod common;
mod loop_test;
