use super::ensure_any;
use crate::{error::Result, tid::tid_enum};
use serde::Serialize;

tid_enum! {
    Sign {
        NoSigns = 1,
        RecentAvalanches = 2,
        WhumpfSound = 3,
        RecentCracks = 4,
        LargeSnowfall = 5,
        QuickTempChange = 7,
        WaterInSnow = 8,
        RecentSnowdrift = 9,
        Other = 99,
    }
}

/// A danger sign observed in the field. Repeatable within a registration.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DangerSign {
    /// 0 when only a comment was given.
    #[serde(rename = "DangerSignTID")]
    sign: i32,
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl DangerSign {
    pub fn new(sign: Option<Sign>, comment: Option<String>) -> Result<DangerSign> {
        ensure_any("danger sign", &[sign.is_some(), comment.is_some()])?;
        Ok(DangerSign {
            sign: sign.map_or(0, Sign::tid),
            comment,
        })
    }

    pub fn sign(sign: Sign) -> DangerSign {
        DangerSign {
            sign: sign.tid(),
            comment: None,
        }
    }
}
