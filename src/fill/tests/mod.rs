mod test_relax_basic;
mod test_selection_basic;
