use tracing::{debug, info, warn};

use super::problem::Problem;
use super::response::OptimizeResult;
use crate::error::OptimizeError;

/// `<endpoint>/optimize`, tolerating a trailing slash on the endpoint.
pub fn optimize_url(endpoint: &str) -> String {
    format!("{}/optimize", endpoint.trim_end_matches('/'))
}

/// Posts `problem` and decodes the optimizer's reply.
///
/// A problem that fails [`Problem::validate`] is rejected with
/// [`OptimizeError::Problem`] before anything is sent. Any non-2xx status
/// fails with [`OptimizeError::Status`] without reading the body.
pub async fn optimize(
    client: &reqwest::Client,
    endpoint: &str,
    problem: &Problem,
) -> Result<OptimizeResult, OptimizeError> {
    problem.validate()?;

    let url = optimize_url(endpoint);
    info!(
        "Submitting {} foods and {} constraints to {url}",
        problem.food_information.len(),
        problem.constraints.len()
    );

    let response = client
        .post(&url)
        .json(problem)
        .send()
        .await
        .map_err(OptimizeError::Http)?;

    let status = response.status();
    if !status.is_success() {
        warn!("Optimizer answered {status}");
        return Err(OptimizeError::Status(status.as_u16()));
    }

    let result: OptimizeResult = response.json().await.map_err(OptimizeError::Decode)?;
    debug!("Optimizer status: {}", result.status);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::problem::{Nutrient, Objective, Sense};

    #[test]
    fn url_joins_endpoint() {
        assert_eq!(optimize_url("http://127.0.0.1:5000"), "http://127.0.0.1:5000/optimize");
        assert_eq!(optimize_url("http://host/api/"), "http://host/api/optimize");
    }

    #[tokio::test]
    async fn invalid_problem_is_not_sent() {
        let problem = Problem {
            food_information: Vec::new(),
            objective: Objective {
                sense: Sense::Minimize,
                nutrient: Nutrient::Fat,
            },
            constraints: Vec::new(),
        };

        // nothing listens on port 9, so reaching the network would be an Http error
        let err = optimize(&reqwest::Client::new(), "http://127.0.0.1:9", &problem)
            .await
            .unwrap_err();

        assert!(matches!(err, OptimizeError::Problem(_)));
        assert_eq!(err.to_string(), "At least one food must be provided.");
    }
}
