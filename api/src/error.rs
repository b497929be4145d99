use log::error;
use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::serde::json::serde_json::{json, Value};
use rocket::{response, Request, Response};
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::okapi::schemars::Map;
use rocket_okapi::response::OpenApiResponderInner;
use service::{NoDataReport, SyncError};

#[derive(Debug)]
pub enum Error {
    Sync(SyncError),
    NoUsableRecords(NoDataReport),
}

trait MyRocketError {
    fn to_rocket_status(&self) -> Status;
    fn to_err_message(&self) -> Option<String>;
}

impl MyRocketError for SyncError {
    fn to_rocket_status(&self) -> Status {
        match self {
            Self::Configuration(_) => Status::InternalServerError,
            Self::UpstreamUnavailable(_) => Status::BadGateway,
            Self::UpstreamEmpty(_) => Status::NotFound,
            Self::NoTournamentFound => Status::NotFound,
            Self::Storage(_) => Status::InternalServerError,
            Self::NotFound(_) => Status::NotFound,
        }
    }

    fn to_err_message(&self) -> Option<String> {
        match self {
            Self::Configuration(_) => Some("Server is not configured for syncing".to_string()),
            Self::UpstreamUnavailable(reason) => {
                Some(format!("Failed to fetch tournament data: {reason}"))
            }
            Self::UpstreamEmpty(reason) => Some(reason.clone()),
            Self::NoTournamentFound => Some("No suitable tournament found".to_string()),
            Self::Storage(reason) => Some(format!("Failed to store tournament data: {reason}")),
            Self::NotFound(reason) => Some(reason.clone()),
        }
    }
}

impl MyRocketError for Error {
    fn to_rocket_status(&self) -> Status {
        match self {
            Self::Sync(e) => e.to_rocket_status(),
            Self::NoUsableRecords(_) => Status::UnprocessableEntity,
        }
    }

    fn to_err_message(&self) -> Option<String> {
        match self {
            Self::Sync(e) => e.to_err_message(),
            Self::NoUsableRecords(_) => Some("No valid player data to update".to_string()),
        }
    }
}

impl Error {
    fn body(&self) -> Value {
        let mut body = json!({
            "success": false,
            "error": self.to_err_message(),
        });
        if let Self::NoUsableRecords(report) = self {
            body["tournament"] = json!(report.tournament);
            body["rawPlayersCount"] = json!(report.raw_players_count);
            body["rejected"] = json!(report.rejected);
            body["samplePlayer"] = json!(report.sample_player);
        }
        body
    }
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.to_rocket_status();
        if status.code >= 500 {
            error!("Request failed with {}: {:?}", status, self);
        }
        let body = self.body().to_string();
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), std::io::Cursor::new(body))
            .ok()
    }
}

impl From<SyncError> for Error {
    fn from(e: SyncError) -> Self {
        Self::Sync(e)
    }
}

impl OpenApiResponderInner for Error {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};

        let mut responses = Map::new();
        responses.insert(
            "404".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [404 Not Found](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404)\n\
                The feed had no usable tournament or players, or the tournament asked for does not exist.\
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "422".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [422 Unprocessable Entity](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/422)\n\
                The feed listed players but none of them could be parsed. Stored scores were left as they were. \
                ".to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "500".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [500 Internal Server Error](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/500)\n\
                The server is misconfigured or the database failed. \
                ".to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "502".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [502 Bad Gateway](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/502)\n\
                The upstream scoreboard could not be reached or returned an error. \
                ".to_string(),
                ..Default::default()
            }),
        );
        Ok(Responses {
            responses,
            ..Default::default()
        })
    }
}
