use anyhow::Context;
use chrono::{NaiveDate, TimeZone};
use log::info;
use regobs_core::{
    config::ClientConfig,
    connection::{Connection, Language},
    elevation::{Elevation, ElevationFormat},
    error::RegObsError,
    exposition::{Direction, Expositions},
    http::HttpTransport,
    observation::{
        avalanche::{AvalancheType, Terrain, Trigger, WeakLayer},
        avalanche_activity::{ActivityType, Distribution, Quantity, Sensitivity},
        danger_sign::Sign,
        incident::{Activity, Extent},
        snow_cover::{Drift, Surface},
        weather::Precipitation,
        AvalancheActivity, AvalancheObs, DangerSign, DestructiveSize, Incident, Note, SnowCover,
        Timeframe, Url, Weather,
    },
    position::Position,
    registration::{SnowRegistration, Source, SpatialPrecision},
    TIMEZONE,
};
use std::time::Duration;

pub struct SubmitOptions {
    pub dry_run: bool,
    pub language: Language,
    pub api_url: Option<String>,
    pub username: Option<String>,
    pub timeout: Duration,
}

fn oslo(year: i32, month: u32, day: u32, hour: u32, min: u32) -> regobs_core::error::Result<chrono::DateTime<chrono_tz::Tz>> {
    TIMEZONE
        .with_ymd_and_hms(year, month, day, hour, min, 0)
        .earliest()
        .ok_or_else(|| RegObsError::Timezone(format!("{}-{:02}-{:02} {:02}:{:02}", year, month, day, hour, min)))
}

/// A registration with one observation of every category.
pub fn demo_registration() -> regobs_core::error::Result<SnowRegistration> {
    let mut reg = SnowRegistration::new(
        oslo(2021, 6, 16, 10, 15)?,
        Position::new(68.4293, 18.2572)?,
        Some(SpatialPrecision::OneHundred),
        Some(Source::Seen),
    );

    reg.add_danger_sign(DangerSign::sign(Sign::WhumpfSound))
        .add_danger_sign(DangerSign::new(
            Some(Sign::QuickTempChange),
            Some("Very quick!".to_string()),
        )?)
        .add_danger_sign(DangerSign::new(
            None,
            Some("It just felt dangerous.".to_string()),
        )?);

    reg.set_avalanche_obs(
        AvalancheObs::builder(oslo(2021, 3, 21, 16, 5)?)
            .start(Position::new(61.1955, 10.3711)?)
            .stop(Position::new(60.8071, 7.9102)?)
            .exposition(Direction::NE)
            .size(DestructiveSize::D3)
            .avalanche_type(AvalancheType::DrySlab)
            .trigger(Trigger::Natural)
            .terrain(Terrain::CloseToRidge)
            .weak_layer(WeakLayer::GroundMelt)
            .fracture_height_cm(225)
            .fracture_width(700)
            .path_name("Path A")
            .comment("Extremely long path.")
            .build()?,
    );

    let activity_date = NaiveDate::from_ymd_opt(2021, 2, 25)
        .ok_or_else(|| RegObsError::Timezone("2021-02-25".to_string()))?;
    reg.add_avalanche_activity(
        AvalancheActivity::builder(activity_date)
            .timeframe(Timeframe::SixToTwelve)
            .quantity(Quantity::Few)
            .avalanche_type(ActivityType::DrySlab)
            .sensitivity(Sensitivity::Spontaneous)
            .size(DestructiveSize::D4)
            .distribution(Distribution::Specific)
            .elevation(Elevation::new(ElevationFormat::Above, 500, None)?)
            .expositions(Expositions::new(&[Direction::NE, Direction::S]))
            .comment("Avalanche activity above 500 masl")
            .build()?,
    );

    reg.set_weather(
        Weather::builder()
            .precipitation(Precipitation::Drizzle)
            .wind_direction(Direction::NE)
            .wind_speed(2.2)
            .cloud_cover(15)
            .build()?,
    )
    .set_snow_cover(
        SnowCover::builder()
            .drift(Drift::Moderate)
            .surface(Surface::WindSlabHard)
            .hn24_cm(9.2)
            .new_snow_line(101)
            .hs_cm(243.7)
            .snow_line(2300)
            .layered_snow_line(203.6)
            .build()?,
    )
    .set_incident(
        Incident::new(
            Some(Activity::Climbing),
            Some(Extent::CloseCall),
            Some("Scary.".to_string()),
        )?
        .with_url(Url::new("https://nve.no", "NVE")),
    )
    .set_note(
        Note::new("Demo registration via the Rust client.")?
            .with_url(Url::new("https://varsom.no", "Varsom")),
    );

    Ok(reg)
}

pub async fn run_submit_demo(options: SubmitOptions) -> anyhow::Result<()> {
    let registration = demo_registration().context("Failed to build demo registration")?;

    if options.dry_run {
        println!("{}", serde_json::to_string_pretty(&registration.payload()?)?);
        return Ok(());
    }

    let config = ClientConfig::from_env_with(options.api_url, options.username)?;
    info!("Submitting demo registration to {}", config.api_url);
    let transport = HttpTransport::new(options.timeout)?;
    let mut connection = Connection::connect(config, transport).await?;
    let stored = connection.submit(&registration, options.language).await?;
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}
