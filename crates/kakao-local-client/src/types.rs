use serde::{Deserialize, Serialize};

/// Administrative region breakdown returned by coordinate lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionAddress {
    /// Province / metropolitan city (시·도)
    pub region_1depth_name: String,
    /// District (시·군·구)
    pub region_2depth_name: String,
    /// Neighbourhood (읍·면·동)
    pub region_3depth_name: String,
}

impl RegionAddress {
    /// Render as `"{region1} {region2} {region3}"`.
    ///
    /// Empty levels are skipped so the result never carries doubled or
    /// trailing spaces.
    pub fn compose(&self) -> String {
        [
            &self.region_1depth_name,
            &self.region_2depth_name,
            &self.region_3depth_name,
        ]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeywordSearchResponse {
    #[serde(default)]
    pub(crate) documents: Vec<KeywordDocument>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeywordDocument {
    #[serde(default)]
    pub(crate) address_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoordToAddressResponse {
    #[serde(default)]
    pub(crate) documents: Vec<CoordToAddressDocument>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoordToAddressDocument {
    pub(crate) address: Option<RegionAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(r1: &str, r2: &str, r3: &str) -> RegionAddress {
        RegionAddress {
            region_1depth_name: r1.into(),
            region_2depth_name: r2.into(),
            region_3depth_name: r3.into(),
        }
    }

    #[test]
    fn test_compose_three_levels() {
        assert_eq!(
            region("서울", "서초구", "서초동").compose(),
            "서울 서초구 서초동"
        );
    }

    #[test]
    fn test_compose_skips_empty_levels() {
        assert_eq!(region("세종특별자치시", "", "한솔동").compose(), "세종특별자치시 한솔동");
        assert_eq!(region("서울", "강남구", "").compose(), "서울 강남구");
    }

    #[test]
    fn test_keyword_response_deserialization() {
        let json = r#"{
            "meta": { "total_count": 2 },
            "documents": [
                { "address_name": "서울 서초구 서초동 1303-22", "place_name": "카페" },
                { "address_name": "서울 서초구 서초동 1337" }
            ]
        }"#;
        let resp: KeywordSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.documents.len(), 2);
        assert_eq!(resp.documents[0].address_name, "서울 서초구 서초동 1303-22");
    }

    #[test]
    fn test_coord_response_deserialization() {
        let json = r#"{
            "documents": [{
                "address": {
                    "address_name": "서울 서초구 서초동 1303-22",
                    "region_1depth_name": "서울",
                    "region_2depth_name": "서초구",
                    "region_3depth_name": "서초동"
                },
                "road_address": null
            }]
        }"#;
        let resp: CoordToAddressResponse = serde_json::from_str(json).unwrap();
        let address = resp.documents[0].address.clone().unwrap();
        assert_eq!(address, region("서울", "서초구", "서초동"));
    }
}
