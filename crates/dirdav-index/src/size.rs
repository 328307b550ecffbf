const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;
const TIB: u64 = 1 << 40;

/// Format a byte count using binary units.
///
/// Counts below 1024 are printed as whole bytes; anything larger uses the
/// biggest unit up to TiB with two decimals, e.g. `"1.50 MiB"`.
pub fn format_size(bytes: u64) -> String {
    let (unit, suffix) = match bytes {
        b if b >= TIB => (TIB, "TiB"),
        b if b >= GIB => (GIB, "GiB"),
        b if b >= MIB => (MIB, "MiB"),
        b if b >= KIB => (KIB, "KiB"),
        b => return format!("{} B", b),
    };
    format!("{:.2} {}", bytes as f64 / unit as f64, suffix)
}
