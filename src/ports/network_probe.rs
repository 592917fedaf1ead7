/// Port for the reachability check performed before cloning a remote source.
pub trait NetworkProbePort {
    /// Whether `host` currently resolves.
    fn is_reachable(&self, host: &str) -> bool;
}
