pub fn validate_origin_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("Origin URL cannot be empty".to_string());
    }
    if url.len() > 2048 {
        return Err("Origin URL cannot exceed 2048 characters".to_string());
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("Origin URL must start with http:// or https://".to_string());
    }
    Ok(())
}

pub fn validate_route_prefix(prefix: &str) -> Result<(), String> {
    if !prefix.starts_with('/') {
        return Err("Route prefix must start with '/'".to_string());
    }
    if prefix.len() > 1 && prefix.ends_with('/') {
        return Err("Route prefix must not end with '/'".to_string());
    }
    if prefix.contains('{') || prefix.contains('}') {
        return Err("Route prefix cannot contain path parameters".to_string());
    }
    Ok(())
}
