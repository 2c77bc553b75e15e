/// Where [`install_with`](crate::install_with) publishes the module table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConfig {
    /// Global the table is bound to.
    pub global_name: String,
    /// Also register the table in `package.loaded`, so `require` returns it.
    pub register_package: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self { global_name: "GPU".to_owned(), register_package: true }
    }
}
