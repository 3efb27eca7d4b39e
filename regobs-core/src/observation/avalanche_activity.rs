use super::{ensure_any, DestructiveSize};
use crate::{
    elevation::Elevation,
    error::{RegObsError, Result},
    exposition::Expositions,
    tid::tid_enum,
    TIMEZONE,
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Part of the day an avalanche activity observation covers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Timeframe {
    ZeroToSix,
    SixToTwelve,
    TwelveToEighteen,
    EighteenToTwentyFour,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::ZeroToSix => "0-6",
            Timeframe::SixToTwelve => "6-12",
            Timeframe::TwelveToEighteen => "12-18",
            Timeframe::EighteenToTwentyFour => "18-24",
        }
    }

    /// Start and end clock times. No timeframe covers the whole day; the day
    /// ends at 23:59.
    pub fn clock_times(timeframe: Option<Timeframe>) -> (NaiveTime, NaiveTime) {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        match timeframe {
            None => (hm(0, 0), hm(23, 59)),
            Some(Timeframe::ZeroToSix) => (hm(0, 0), hm(6, 0)),
            Some(Timeframe::SixToTwelve) => (hm(6, 0), hm(12, 0)),
            Some(Timeframe::TwelveToEighteen) => (hm(12, 0), hm(18, 0)),
            Some(Timeframe::EighteenToTwentyFour) => (hm(18, 0), hm(23, 59)),
        }
    }

    /// The timeframe on `date` as a pair of instants in Europe/Oslo.
    pub fn window(
        timeframe: Option<Timeframe>,
        date: NaiveDate,
    ) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let (start, end) = Timeframe::clock_times(timeframe);
        Ok((localize(date, start)?, localize(date, end)?))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = RegObsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0-6" => Ok(Timeframe::ZeroToSix),
            "6-12" => Ok(Timeframe::SixToTwelve),
            "12-18" => Ok(Timeframe::TwelveToEighteen),
            "18-24" => Ok(Timeframe::EighteenToTwentyFour),
            other => Err(RegObsError::UnknownTimeframe(other.to_string())),
        }
    }
}

fn localize(date: NaiveDate, time: NaiveTime) -> Result<DateTime<FixedOffset>> {
    let naive = date.and_time(time);
    TIMEZONE
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| RegObsError::Timezone(naive.to_string()))
}

tid_enum! {
    Quantity {
        NoActivity = 1,
        One = 2,
        Few = 3,
        Several = 4,
        Numerous = 5,
    }
}

tid_enum! {
    ActivityType {
        DryLoose = 10,
        WetLoose = 15,
        DrySlab = 20,
        WetSlab = 25,
        Glide = 27,
        SlushFlow = 30,
        Cornice = 40,
    }
}

tid_enum! {
    Sensitivity {
        VeryDifficult = 30,
        Difficult = 40,
        Easy = 50,
        VeryEasy = 60,
        Spontaneous = 22,
    }
}

tid_enum! {
    Distribution {
        Isolated = 1,
        Specific = 2,
        Widespread = 3,
    }
}

/// Avalanche activity during (part of) a day. Repeatable within a registration.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct AvalancheActivity {
    #[serde(rename = "AvalPropagationTID", skip_serializing_if = "Option::is_none")]
    distribution: Option<Distribution>,
    #[serde(rename = "AvalTriggerSimpleTID", skip_serializing_if = "Option::is_none")]
    sensitivity: Option<Sensitivity>,
    #[serde(rename = "AvalancheExtTID", skip_serializing_if = "Option::is_none")]
    avalanche_type: Option<ActivityType>,
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(rename = "DestructiveSizeTID", skip_serializing_if = "Option::is_none")]
    size: Option<DestructiveSize>,
    #[serde(rename = "DtEnd")]
    end: DateTime<FixedOffset>,
    #[serde(rename = "DtStart")]
    start: DateTime<FixedOffset>,
    #[serde(rename = "EstimatedNumTID", skip_serializing_if = "Option::is_none")]
    quantity: Option<Quantity>,
    #[serde(rename = "ValidExposition", skip_serializing_if = "Option::is_none")]
    expositions: Option<Expositions>,
    #[serde(flatten)]
    elevation: Option<Elevation>,
}

impl AvalancheActivity {
    pub fn builder(date: NaiveDate) -> AvalancheActivityBuilder {
        AvalancheActivityBuilder {
            date,
            timeframe: None,
            quantity: None,
            avalanche_type: None,
            sensitivity: None,
            size: None,
            distribution: None,
            elevation: None,
            expositions: None,
            comment: None,
        }
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }
}

#[derive(Debug, Clone)]
pub struct AvalancheActivityBuilder {
    date: NaiveDate,
    timeframe: Option<Timeframe>,
    quantity: Option<Quantity>,
    avalanche_type: Option<ActivityType>,
    sensitivity: Option<Sensitivity>,
    size: Option<DestructiveSize>,
    distribution: Option<Distribution>,
    elevation: Option<Elevation>,
    expositions: Option<Expositions>,
    comment: Option<String>,
}

impl AvalancheActivityBuilder {
    pub fn timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn avalanche_type(mut self, avalanche_type: ActivityType) -> Self {
        self.avalanche_type = Some(avalanche_type);
        self
    }

    pub fn sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = Some(sensitivity);
        self
    }

    pub fn size(mut self, size: DestructiveSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = Some(distribution);
        self
    }

    pub fn elevation(mut self, elevation: Elevation) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn expositions(mut self, expositions: Expositions) -> Self {
        self.expositions = Some(expositions);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn build(self) -> Result<AvalancheActivity> {
        let avalanche_attributes = [
            self.avalanche_type.is_some(),
            self.sensitivity.is_some(),
            self.size.is_some(),
            self.distribution.is_some(),
            self.elevation.is_some(),
            self.expositions.is_some(),
        ];
        if self.quantity == Some(Quantity::NoActivity) && avalanche_attributes.iter().any(|&a| a) {
            return Err(RegObsError::IncompatibleAttributes(
                "avalanche attributes specified, but no avalanche activity reported".to_string(),
            ));
        }
        let mut present = avalanche_attributes.to_vec();
        present.extend([self.quantity.is_some(), self.comment.is_some()]);
        ensure_any("avalanche activity", &present)?;

        let (start, end) = Timeframe::window(self.timeframe, self.date)?;
        Ok(AvalancheActivity {
            distribution: self.distribution,
            sensitivity: self.sensitivity,
            avalanche_type: self.avalanche_type,
            comment: self.comment,
            size: self.size,
            end,
            start,
            quantity: self.quantity,
            expositions: self.expositions,
            elevation: self.elevation,
        })
    }
}
