use std::net::IpAddr;

/// Drops repeated addresses, keeping the first occurrence of each.
pub(crate) fn dedup_ordered(ips: Vec<IpAddr>) -> Vec<IpAddr> {
    let mut unique: Vec<IpAddr> = Vec::with_capacity(ips.len());
    for ip in ips {
        if !unique.contains(&ip) {
            unique.push(ip);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use super::dedup_ordered;

    #[test]
    fn dedup_keeps_first_occurrence_order() -> Result<(), String> {
        let a = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
        let b = IpAddr::V6(Ipv6Addr::LOCALHOST);
        let c = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let unique = dedup_ordered(vec![a, b, a, c, b]);
        if unique != vec![a, b, c] {
            return Err(format!("Unexpected order: {:?}", unique));
        }
        if !dedup_ordered(Vec::new()).is_empty() {
            return Err("Expected empty input to stay empty".to_owned());
        }
        Ok(())
    }
}
