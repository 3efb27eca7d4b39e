use super::{ensure_any, Url};
use crate::{error::Result, tid::tid_enum};
use serde::Serialize;

tid_enum! {
    /// What the people involved were doing.
    Activity {
        Backcountry = 111,
        Resort = 112,
        OffPiste = 113,
        Nordic = 114,
        CrossCountry = 115,
        Climbing = 116,
        Foot = 117,
        Road = 120,
        Snowmobile = 130,
        Railway = 140,
        Building = 160,
        Other = 190,
    }
}

tid_enum! {
    Extent {
        NoEffect = 10,
        Sar = 13,
        Traffic = 15,
        MaterialOnly = 20,
        Evacuation = 25,
        CloseCall = 27,
        BurialUnharmed = 28,
        PeopleHurt = 30,
        Fatal = 40,
        Other = 99,
    }
}

/// An accident or near miss.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Incident {
    #[serde(rename = "ActivityInfluencedTID", skip_serializing_if = "Option::is_none")]
    activity: Option<Activity>,
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(rename = "DamageExtentTID", skip_serializing_if = "Option::is_none")]
    extent: Option<Extent>,
    #[serde(rename = "IncidentURLs")]
    urls: Vec<Url>,
}

impl Incident {
    pub fn new(
        activity: Option<Activity>,
        extent: Option<Extent>,
        comment: Option<String>,
    ) -> Result<Incident> {
        ensure_any(
            "incident",
            &[activity.is_some(), extent.is_some(), comment.is_some()],
        )?;
        Ok(Incident {
            activity,
            comment,
            extent,
            urls: Vec::new(),
        })
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.urls.push(url);
        self
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }
}
