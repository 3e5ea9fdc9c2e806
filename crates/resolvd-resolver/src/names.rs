/// Decentralized-domain suffixes served by the Unstoppable Domains
/// resolution API.
pub const UNSTOPPABLE_SUFFIXES: [&str; 10] = [
    ".zil",
    ".crypto",
    ".nft",
    ".blockchain",
    ".bitcoin",
    ".coin",
    ".wallet",
    ".888",
    ".dao",
    ".x",
];

/// True when `candidate` ends with any of the suffixes.
pub fn ends_with_any(suffixes: &[&str], candidate: &str) -> bool {
    suffixes.iter().any(|suffix| candidate.ends_with(suffix))
}

/// Public IPFS gateway prefixes, by short name.
pub fn ipfs_gateway(name: &str) -> Option<&'static str> {
    Some(match name {
        "pinata" => "https://gateway.pinata.cloud/ipfs/",
        "cloudflare" => "https://cloudflare-ipfs.com/ipfs/",
        "ipfs" => "https://ipfs.io/ipfs/",
        "dweb" => "https://dweb.link/ipfs/",
        "cf" => "https://cf-ipfs.com/ipfs/",
        "astyanax" => "https://astyanax.io/ipfs/",
        _ => return None,
    })
}
