use rideguard_domain::{IncidentRecord, IncidentType, RelayResult, ScriptVariant};

pub const SYSTEM_NAME: &str = "RideGuard Safety System";

/// 根据事故记录生成播报脚本
///
/// 先校验记录，任何字段缺失都直接返回 `MissingField`，不会生成残缺的脚本。
pub fn compose(
    record: &IncidentRecord,
    incident_type: &IncidentType,
    variant: ScriptVariant,
) -> RelayResult<String> {
    record.validate()?;

    let script = match variant {
        ScriptVariant::Detailed => detailed(record, incident_type),
        ScriptVariant::Simplified => simplified(record, incident_type),
    };
    Ok(script)
}

fn detailed(record: &IncidentRecord, incident_type: &IncidentType) -> String {
    let passenger = &record.passenger;
    let driver = &record.driver;
    let vehicle = &record.vehicle;
    let location = &record.location;

    let lines = [
        "URGENT EMERGENCY CALL - PASSENGER IN DANGER".to_string(),
        String::new(),
        format!("This is an automated emergency call from the {SYSTEM_NAME}."),
        "I am calling on behalf of a passenger who is currently in danger and needs immediate assistance.".to_string(),
        String::new(),
        "INCIDENT DETAILS:".to_string(),
        format!("- Emergency Type: {}", incident_type.display_name()),
        "- Severity: HIGH PRIORITY - PASSENGER IN IMMEDIATE DANGER".to_string(),
        "- The passenger activated the emergency SOS button in the ride app".to_string(),
        String::new(),
        "PASSENGER IN DISTRESS:".to_string(),
        format!("- Passenger Name: {}", passenger.name),
        format!("- Passenger Phone: {}", passenger.phone),
        String::new(),
        "DRIVER INFORMATION:".to_string(),
        format!("- Driver Name: {}", driver.name),
        format!("- Driver Phone: {}", driver.phone),
        format!("- Driver License: {}", driver.license),
        String::new(),
        "VEHICLE IDENTIFICATION:".to_string(),
        format!("- Vehicle: {} {} {}", vehicle.year, vehicle.make, vehicle.model),
        format!("- Color: {}", vehicle.color),
        format!("- License Plate: {}", vehicle.plate),
        String::new(),
        "CURRENT LOCATION:".to_string(),
        format!("- Address: {}", location.address),
        format!(
            "- GPS Coordinates: {}, {}",
            location.gps_lat, location.gps_lng
        ),
        "- This is the exact location where the passenger needs help".to_string(),
        String::new(),
        "IMMEDIATE ACTION REQUIRED:".to_string(),
        "The passenger is in danger and requires immediate assistance.".to_string(),
        format!(
            "Please dispatch emergency services to {} immediately.",
            location.address
        ),
        String::new(),
        format!(
            "For urgent follow-up, contact the passenger directly at {}.",
            passenger.phone
        ),
        format!("The driver's number is {}.", driver.phone),
        String::new(),
        format!("This is an automated emergency call from the {SYSTEM_NAME}."),
    ];

    lines.join("\n")
}

fn simplified(record: &IncidentRecord, incident_type: &IncidentType) -> String {
    let passenger = &record.passenger;
    let driver = &record.driver;
    let vehicle = &record.vehicle;
    let location = &record.location;

    let sentences = [
        format!("Emergency Alert from the {SYSTEM_NAME}."),
        format!("This is a {} emergency.", incident_type.display_name()),
        format!("Passenger {} requires immediate assistance.", passenger.name),
        format!(
            "Location: {}, GPS coordinates {}, {}.",
            location.address, location.gps_lat, location.gps_lng
        ),
        format!(
            "Vehicle: {} {} {} {}, license plate {}.",
            vehicle.color, vehicle.year, vehicle.make, vehicle.model, vehicle.plate
        ),
        format!(
            "Driver: {}, phone {}, driver license {}.",
            driver.name, driver.phone, driver.license
        ),
        format!("Passenger phone: {}.", passenger.phone),
        format!(
            "Please dispatch emergency services to {} immediately.",
            location.address
        ),
        format!("Repeating location: {}.", location.address),
        "This is an automated emergency call from RideGuard.".to_string(),
    ];

    sentences.join(" ")
}
