//! Error types for configuration and IO, as opposed to the invariant-violation
//! panics used inside the integrator itself (spec.md §7).

error_chain::error_chain! {
    foreign_links {
        Toml(toml::de::Error);
        Io(std::io::Error);
    }
}
