//! CSV export of a project's versions

use crate::types::Version;
use chrono::NaiveDate;

/// Download name for a project's version export taken on `date`
pub fn versions_filename(project: &str, date: NaiveDate) -> String {
    format!("{}_versions_{}.csv", project, date.format("%Y-%m-%d"))
}

/// Header row followed by one row per version
pub fn version_rows(
    versions: Vec<Version>,
) -> impl Iterator<Item = Vec<String>> + Send + 'static {
    let header: Vec<String> = Version::CSV_HEADER.iter().map(|h| h.to_string()).collect();
    std::iter::once(header).chain(versions.into_iter().map(|v| v.csv_record()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::csv::CsvLines;
    use crate::types::VersionType;

    #[test]
    fn test_versions_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(versions_filename("pip", date), "pip_versions_2024-03-09.csv");
    }

    #[test]
    fn test_version_rows() {
        let versions = vec![Version {
            id: 1,
            project: "pip".to_string(),
            slug: "stable".to_string(),
            verbose_name: "Stable, 23.1".to_string(),
            identifier: "23.1".to_string(),
            version_type: VersionType::Tag,
            active: true,
            built: true,
            privacy_level: "public".to_string(),
        }];

        let csv: Vec<u8> = CsvLines::new(version_rows(versions))
            .flat_map(|line| line.unwrap().to_vec())
            .collect();

        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "slug,verbose_name,identifier,type,active,built,privacy_level\r\n\
             stable,\"Stable, 23.1\",23.1,tag,true,true,public\r\n"
        );
    }

    #[test]
    fn test_version_rows_header_only() {
        let rows: Vec<_> = version_rows(Vec::new()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "slug");
    }
}
