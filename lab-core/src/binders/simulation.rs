use lab_client::{LabClient, Lighting, SimulationInput, Transport, VruType, Weather};
use crate::error::{BinderError, Required};

/// The simulation form as the user filled it in. Numbers stay as typed until
/// the form is submitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationForm {
    pub vehicle_speed: String,
    pub vru_distance: String,
    pub vru_type: VruType,
    pub weather: Weather,
    pub lighting: Lighting,
}

impl SimulationForm {
    pub fn to_input(&self) -> Result<SimulationInput, BinderError> {
        let mut req = Required::default();
        let vehicle_speed = req.number("vehicle_speed", &self.vehicle_speed);
        let vru_distance = req.number("vru_distance", &self.vru_distance);
        req.finish()?;
        Ok(SimulationInput {
            vehicle_speed,
            vru_distance,
            vru_type: self.vru_type,
            weather: self.weather,
            lighting: self.lighting,
        })
    }
}

/// Result fields as displayed; numbers keep the server's formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationView {
    pub reaction_distance: String,
    pub braking_distance: String,
    pub total_stopping_distance: String,
    pub risk_score: String,
    pub risk_level: String,
    pub collision_likely: &'static str,
}

pub async fn run<T: Transport>(client: &LabClient<T>, form: &SimulationForm) -> Result<SimulationView, BinderError> {
    let input = form.to_input()?;
    let resp = client.run_simulation(&input).await?;
    log::debug!("Simulation risk {} ({})", resp.risk_score, resp.risk_level);
    Ok(SimulationView {
        reaction_distance: resp.reaction_distance.to_string(),
        braking_distance: resp.braking_distance.to_string(),
        total_stopping_distance: resp.total_stopping_distance.to_string(),
        risk_score: resp.risk_score.to_string(),
        risk_level: resp.risk_level,
        collision_likely: if resp.collision_likely { "Yes" } else { "No" },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::testing::FakeBackend;

    fn form(speed: &str, distance: &str) -> SimulationForm {
        SimulationForm {
            vehicle_speed: speed.into(),
            vru_distance: distance.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fixed_payload_renders_verbatim() {
        let client = FakeBackend::new()
            .on(
                "/sim/run",
                json!({
                    "input": {},
                    "speed_m_s": 13.89,
                    "reaction_distance": 20.83,
                    "braking_distance": 16.38,
                    "total_stopping_distance": 37.21,
                    "risk_score": 1.861,
                    "risk_level": "High",
                    "collision_likely": true
                }),
            )
            .client();
        let view = run(&client, &form("50", "20")).await.unwrap();
        assert_eq!(
            view,
            SimulationView {
                reaction_distance: "20.83".into(),
                braking_distance: "16.38".into(),
                total_stopping_distance: "37.21".into(),
                risk_score: "1.861".into(),
                risk_level: "High".into(),
                collision_likely: "Yes",
            }
        );
        assert_eq!(
            *client.transport().json_bodies.borrow(),
            [json!({
                "vehicle_speed": 50.0,
                "vru_distance": 20.0,
                "vru_type": "pedestrian",
                "weather": "clear",
                "lighting": "day"
            })]
        );
    }

    #[tokio::test]
    async fn test_blank_numbers_block_the_request() {
        let client = FakeBackend::new().client();
        let err = run(&client, &form("", "abc")).await.unwrap_err();
        assert_eq!(err, BinderError::missing(vec!["vehicle_speed", "vru_distance"]));
        assert_eq!(client.transport().call_count(), 0);
    }

    #[test]
    fn test_enums_use_wire_names() {
        let input = SimulationForm {
            vru_type: VruType::TwoWheeler,
            weather: Weather::Fog,
            lighting: Lighting::Night,
            ..form("30.5", "8")
        }
        .to_input()
        .unwrap();
        let body = serde_json::to_value(input).unwrap();
        assert_eq!(body["vru_type"], "2-wheeler");
        assert_eq!(body["weather"], "fog");
        assert_eq!(body["vehicle_speed"], 30.5);
    }
}
