//! Segmentation backend client and mask selection.
//!
//! The backend wraps a pretrained Segment-Anything model behind a small
//! HTTP API: upload an image to start a session, then send prompt points
//! and/or a box to `/segment` and get back candidate masks, each with a
//! confidence score and one or more polygon contours.
//!
//! Mask selection is pure and lives here so it can be tested without a
//! server: pick the highest-scoring mask, then its largest-area contour.

use serde::{Deserialize, Serialize};

use crate::error::SvatError;
use crate::geometry::{self, Point};
use crate::model::BoxCorners;

/// Server-side handle binding an uploaded image to segmentation requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque id issued by `/session/start`.
    pub session_id: String,
    /// (width, height) of the uploaded image.
    pub image_size: (u32, u32),
    /// Where the backend serves the uploaded image from.
    pub image_url: Option<String>,
    /// Original filename of the upload.
    pub image_name: String,
}

// ============================================================================
// Wire types
// ============================================================================

/// JSON body for `POST /segment`.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentRequest {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<[f32; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_labels: Option<Vec<i32>>,
    #[serde(rename = "box", skip_serializing_if = "Option::is_none")]
    pub box_xyxy: Option<[f32; 4]>,
    pub multimask: bool,
}

impl SegmentRequest {
    /// Build a request from accumulated prompts. Every point is labeled
    /// `1` (foreground); exactly one mask is requested.
    pub fn from_prompts(
        session_id: impl Into<String>,
        points: &[Point],
        prompt_box: Option<&BoxCorners>,
    ) -> Self {
        let coords: Option<Vec<[f32; 2]>> = if points.is_empty() {
            None
        } else {
            Some(points.iter().map(|p| [p.x, p.y]).collect())
        };
        let labels = coords.as_ref().map(|c| vec![1; c.len()]);
        Self {
            session_id: session_id.into(),
            points: coords,
            point_labels: labels,
            box_xyxy: prompt_box.map(BoxCorners::as_xyxy),
            multimask: false,
        }
    }
}

/// One candidate mask: a confidence score plus one or more contours.
/// A mask may decompose into multiple disconnected contours.
#[derive(Debug, Clone, Deserialize)]
pub struct MaskCandidate {
    pub score: f32,
    pub polygons: Vec<Vec<[f32; 2]>>,
}

/// Response of `POST /segment`.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentResponse {
    #[serde(default)]
    pub image_size: Option<[u32; 2]>,
    #[serde(default)]
    pub num_masks: Option<usize>,
    pub masks: Vec<MaskCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct SessionStartResponse {
    session_id: String,
    image_size: [u32; 2],
    #[serde(default)]
    image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AuthResponse {
    ok: bool,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub device: Option<String>,
}

/// FastAPI-style error body.
#[derive(Debug, Clone, Deserialize)]
struct ErrorDetail {
    detail: String,
}

// ============================================================================
// Mask selection
// ============================================================================

/// Pick the candidate mask with the highest confidence score.
pub fn best_mask(masks: &[MaskCandidate]) -> Option<&MaskCandidate> {
    masks
        .iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
}

/// Pick the principal contour of a mask: the one with the largest shoelace
/// area. Smaller contours (holes, noise islands) are discarded.
pub fn principal_contour(mask: &MaskCandidate) -> Option<Vec<Point>> {
    mask.polygons
        .iter()
        .map(|pairs| {
            pairs
                .iter()
                .map(|[x, y]| Point::new(*x, *y))
                .collect::<Vec<Point>>()
        })
        .max_by(|a, b| {
            geometry::polygon_area(a)
                .partial_cmp(&geometry::polygon_area(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

// ============================================================================
// HTTP client
// ============================================================================

/// Blocking HTTP client for the segmentation service.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Create a client for a service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health`.
    pub fn health(&self) -> Result<HealthResponse, SvatError> {
        let resp = self
            .http
            .get(self.url("/health"))
            .send()
            .map_err(|e| SvatError::backend(e.to_string()))?;
        Self::parse(resp)
    }

    /// `POST /auth`. Returns whether the password was accepted.
    pub fn auth(&self, password: &str) -> Result<bool, SvatError> {
        let resp = self
            .http
            .post(self.url("/auth"))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .map_err(|e| SvatError::backend(e.to_string()))?;
        let auth: AuthResponse = Self::parse(resp)?;
        Ok(auth.ok)
    }

    /// Upload an image via multipart `POST /session/start` and return the
    /// new session. Must succeed before segmentation is possible.
    pub fn start_session(
        &self,
        file_name: &str,
        image_bytes: Vec<u8>,
    ) -> Result<Session, SvatError> {
        let part = reqwest::blocking::multipart::Part::bytes(image_bytes)
            .file_name(file_name.to_string());
        let form = reqwest::blocking::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(self.url("/session/start"))
            .multipart(form)
            .send()
            .map_err(|e| SvatError::backend(e.to_string()))?;
        let started: SessionStartResponse = Self::parse(resp)?;

        log::info!(
            "Session {} started for '{}' ({}x{})",
            started.session_id,
            file_name,
            started.image_size[0],
            started.image_size[1]
        );
        Ok(Session {
            session_id: started.session_id,
            image_size: (started.image_size[0], started.image_size[1]),
            image_url: started.image_url,
            image_name: file_name.to_string(),
        })
    }

    /// `POST /segment` with the given prompts.
    pub fn segment(&self, request: &SegmentRequest) -> Result<SegmentResponse, SvatError> {
        let resp = self
            .http
            .post(self.url("/segment"))
            .json(request)
            .send()
            .map_err(|e| SvatError::backend(e.to_string()))?;
        Self::parse(resp)
    }

    /// `POST /session/end`. Failure is not fatal; the server also reaps
    /// sessions on its own.
    pub fn end_session(&self, session_id: &str) -> Result<(), SvatError> {
        let resp = self
            .http
            .post(self.url("/session/end"))
            .json(&serde_json::json!({ "session_id": session_id }))
            .send()
            .map_err(|e| SvatError::backend(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(resp))
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(
        resp: reqwest::blocking::Response,
    ) -> Result<T, SvatError> {
        if resp.status().is_success() {
            resp.json::<T>()
                .map_err(|e| SvatError::backend(format!("invalid response: {}", e)))
        } else {
            Err(Self::error_from(resp))
        }
    }

    /// Surface the backend's error detail when present, else a generic
    /// description of the status.
    fn error_from(resp: reqwest::blocking::Response) -> SvatError {
        let status = resp.status();
        match resp.json::<ErrorDetail>() {
            Ok(body) => SvatError::backend(body.detail),
            Err(_) => SvatError::backend(format!("request failed with status {}", status)),
        }
    }
}
