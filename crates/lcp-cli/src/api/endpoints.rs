//! URL builders for the LCP server API

pub fn health_url(base: &str) -> String {
    format!("{}/health", base.trim_end_matches('/'))
}

pub fn import_csv_url(base: &str) -> String {
    format!("{}/api/products/import-csv", base.trim_end_matches('/'))
}

pub fn export_csv_url(base: &str, template: bool) -> String {
    let base = base.trim_end_matches('/');
    if template {
        format!("{base}/api/products/export-csv?template=true")
    } else {
        format!("{base}/api/products/export-csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        assert_eq!(health_url("http://x:8000/"), "http://x:8000/health");
        assert_eq!(
            import_csv_url("http://x:8000"),
            "http://x:8000/api/products/import-csv"
        );
        assert_eq!(
            export_csv_url("http://x:8000/", true),
            "http://x:8000/api/products/export-csv?template=true"
        );
    }
}
