mod literal_e2e_test;
mod resolve_test;
