use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::error::BlockingError;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use wordlist_gen_core::io::{normalize_folder, resolve_output_path, DEFAULT_OUTPUT_DIR};
use wordlist_gen_core::{Category, GenError, GenerationConfig, Generator, DEFAULT_COUNT, MAX_LENGTH};

/// Largest list a single request may produce unless `--max-entries` says otherwise.
const DEFAULT_SERVER_MAX_ENTRIES: usize = 100_000;

/// HTTP front-end of the wordlist generator.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Address the server listens on
	#[arg(long, env = "WORDLIST_BIND", default_value = "127.0.0.1:5000")]
	bind: String,

	/// Directory `PUT /v1/save` writes to
	#[arg(long, env = "WORDLIST_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
	output_dir: String,

	/// Largest list a request may produce, in both modes
	#[arg(long, env = "WORDLIST_MAX_ENTRIES", default_value_t = DEFAULT_SERVER_MAX_ENTRIES)]
	max_entries: usize,
}

/// Immutable settings shared by every worker.
struct ServerSettings {
	output_dir: PathBuf,
	max_entries: usize,
}

/// Query parameters of `/v1/generate` and `/v1/save`
///
/// An unknown `category` is rejected by the extractor with a 400.
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<i64>,
	category: Option<Category>,
	start: Option<String>,
	end: Option<String>,
	count: Option<usize>,
	seed: Option<u64>,
	filename: Option<String>,
}

/// One line of `/v1/categories`
#[derive(Serialize)]
struct CategoryInfo {
	number: usize,
	name: Category,
	description: &'static str,
	pool_size: Option<usize>,
}

impl GenerateParams {
	/// Builds the generation settings described by the query.
	///
	/// `filename` is resolved under the output directory and may not leave it.
	fn config(&self, settings: &ServerSettings) -> Result<GenerationConfig, GenError> {
		let category = self.category.ok_or_else(|| GenError::InvalidCategory(String::new()))?;
		let mut builder = GenerationConfig::builder()
			.category(category)
			.length(self.length.unwrap_or(MAX_LENGTH as i64))
			.count(self.count.unwrap_or(DEFAULT_COUNT))
			.max_entries(settings.max_entries)
			.seed(self.seed);

		if let Some(start) = &self.start {
			builder = builder.range_start_str(start);
		}
		if let Some(end) = &self.end {
			builder = builder.range_end_str(end);
		}
		if let Some(filename) = &self.filename {
			builder = builder.output_path(resolve_output_path(&settings.output_dir, filename)?);
		}
		builder.build()
	}
}

/// Configuration errors are the client's fault, I/O errors are ours.
fn error_response(error: GenError) -> HttpResponse {
	if error.is_config_error() {
		HttpResponse::BadRequest().body(error.to_string())
	} else {
		warn!("{error}");
		HttpResponse::InternalServerError().body(error.to_string())
	}
}

fn blocking_failure(error: BlockingError) -> HttpResponse {
	warn!("generation task failed: {error}");
	HttpResponse::InternalServerError().body("Generation failed")
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns the generated entries, one per line. The `filename` parameter
/// is ignored; use `PUT /v1/save` to write a file.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<ServerSettings>, query: web::Query<GenerateParams>) -> impl Responder {
	let config = match query.config(&data) {
		Ok(c) => c,
		Err(e) => return error_response(e),
	};

	let generated = web::block(move || {
		let list = Generator::for_config(&config).generate(&config)?;
		let mut body = String::with_capacity(list.len() * (list.length() + 1));
		for entry in list.entries() {
			body.push_str(entry);
			body.push('\n');
		}
		Ok::<_, GenError>(body)
	})
	.await;

	match generated {
		Ok(Ok(body)) => HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(body),
		Ok(Err(e)) => error_response(e),
		Err(e) => blocking_failure(e),
	}
}

/// HTTP PUT endpoint `/v1/save`
///
/// Generates the list and writes it under the server output directory.
#[put("/v1/save")]
async fn put_saved(data: web::Data<ServerSettings>, query: web::Query<GenerateParams>) -> impl Responder {
	let config = match query.config(&data) {
		Ok(c) => c,
		Err(e) => return error_response(e),
	};

	match web::block(move || Generator::for_config(&config).save(&config)).await {
		Ok(Ok(status)) => {
			info!("{status}");
			HttpResponse::Ok().body(status.to_string())
		}
		Ok(Err(e)) => error_response(e),
		Err(e) => blocking_failure(e),
	}
}

#[get("/v1/categories")]
async fn get_categories() -> impl Responder {
	let categories: Vec<CategoryInfo> = Category::ALL
		.into_iter()
		.map(|c| CategoryInfo {
			number: c.menu_number(),
			name: c,
			description: c.description(),
			pool_size: c.pool().ok().map(str::len),
		})
		.collect();
	HttpResponse::Ok().json(categories)
}

/// Main entry point for the server.
///
/// Settings are read-only, so workers share them without a lock and
/// each request builds its own generator on the blocking pool.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let settings = web::Data::new(ServerSettings {
		output_dir: normalize_folder(&args.output_dir),
		max_entries: args.max_entries,
	});
	info!(
		"writing lists to {}, at most {} entries per request",
		settings.output_dir.display(),
		settings.max_entries
	);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(settings.clone())
			.service(get_generated)
			.service(put_saved)
			.service(get_categories)
	})
		.bind(args.bind.as_str())?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	fn settings(output_dir: PathBuf) -> web::Data<ServerSettings> {
		web::Data::new(ServerSettings { output_dir, max_entries: DEFAULT_SERVER_MAX_ENTRIES })
	}

	#[actix_web::test]
	async fn generate_sequential_list() {
		let app = test::init_service(
			App::new().app_data(settings(PathBuf::from("unused"))).service(get_generated),
		)
		.await;
		let req = test::TestRequest::get()
			.uri("/v1/generate?category=sequential&length=3&start=5&end=8")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		let body = test::read_body(resp).await;
		assert_eq!(body, web::Bytes::from_static(b"005\n006\n007\n008\n"));
	}

	#[actix_web::test]
	async fn generate_random_list_with_count() {
		let app = test::init_service(
			App::new().app_data(settings(PathBuf::from("unused"))).service(get_generated),
		)
		.await;
		let req = test::TestRequest::get()
			.uri("/v1/generate?category=digits&length=3&count=50&seed=1")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		let body = test::read_body(resp).await;
		let text = std::str::from_utf8(&body).unwrap();
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines.len(), 50);
		assert!(lines.iter().all(|l| l.len() == 3 && l.bytes().all(|b| b.is_ascii_digit())));
	}

	#[actix_web::test]
	async fn configuration_errors_are_bad_requests() {
		let app = test::init_service(
			App::new().app_data(settings(PathBuf::from("unused"))).service(get_generated),
		)
		.await;
		for uri in [
			"/v1/generate?category=UNKNOWN_TAG&length=3",
			"/v1/generate?category=lower&length=9",
			"/v1/generate?category=sequential&length=3&start=8&end=8",
			"/v1/generate?category=sequential&length=3&start=1",
		] {
			let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
		}
	}

	#[actix_web::test]
	async fn save_writes_under_output_dir() {
		let dir = tempfile::tempdir().unwrap();
		let output_dir = dir.path().join("wordlist");
		let app = test::init_service(App::new().app_data(settings(output_dir.clone())).service(put_saved)).await;

		let req = test::TestRequest::put()
			.uri("/v1/save?category=sequential&length=2&start=1&end=3&filename=seq.txt")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		assert_eq!(std::fs::read_to_string(output_dir.join("seq.txt")).unwrap(), "01\n02\n03\n");

		let req = test::TestRequest::put().uri("/v1/save?category=lower&length=2").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn categories_are_listed() {
		let app = test::init_service(App::new().service(get_categories)).await;
		let req = test::TestRequest::get().uri("/v1/categories").to_request();
		let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
		let list = body.as_array().unwrap();
		assert_eq!(list.len(), 9);
		assert_eq!(list[1]["name"], "digits");
		assert_eq!(list[1]["pool_size"], 10);
		assert!(list[8]["pool_size"].is_null());
	}

	#[actix_web::test]
	async fn oversized_lists_are_bad_requests() {
		let app = test::init_service(
			App::new().app_data(settings(PathBuf::from("unused"))).service(get_generated),
		)
		.await;
		for uri in [
			"/v1/generate?category=digits&length=3&count=18446744073709551615",
			"/v1/generate?category=digits&length=3&count=100001",
			"/v1/generate?category=sequential&length=8&start=0&end=99999999",
		] {
			let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
		}

		let uri = "/v1/generate?category=digits&length=1&count=100000";
		let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
		assert_eq!(resp.status(), StatusCode::OK);
	}

	#[actix_web::test]
	async fn save_never_leaves_output_dir() {
		let dir = tempfile::tempdir().unwrap();
		let output_dir = dir.path().join("wordlist");
		let app = test::init_service(App::new().app_data(settings(output_dir.clone())).service(put_saved)).await;

		let absolute = dir.path().join("absolute.txt");
		let filenames = [absolute.display().to_string(), "../dotdot.txt".to_owned(), "a/../../nested.txt".to_owned()];
		for filename in &filenames {
			let uri = format!("/v1/save?category=digits&length=2&count=5&filename={filename}");
			let resp = test::call_service(&app, test::TestRequest::put().uri(&uri).to_request()).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{filename}");
		}

		assert!(!absolute.exists());
		assert!(!dir.path().join("dotdot.txt").exists());
		assert!(!dir.path().join("nested.txt").exists());
		assert!(!output_dir.exists());
	}
}
