use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Seconds and nanoseconds since the Unix epoch, UTC.
#[derive(ToSchema)]
pub struct TimestampDoc { pub seconds: i64, pub nanos: i32 }

#[derive(ToSchema)]
pub struct MemoDoc {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub reminder: TimestampDoc,
}

#[derive(ToSchema)]
pub struct CreateMemoRequestDoc {
    pub api: Option<String>,
    pub name: String,
    pub description: String,
    pub reminder: TimestampDoc,
}

#[derive(ToSchema)]
pub struct CreateMemoResponseDoc { pub api: String, pub id: i64 }

#[derive(ToSchema)]
pub struct ReadMemoResponseDoc { pub api: String, pub memo: MemoDoc }

/// `id` is taken from the path.
#[derive(ToSchema)]
pub struct UpdateMemoRequestDoc {
    pub api: Option<String>,
    pub name: String,
    pub description: String,
    pub reminder: TimestampDoc,
}

#[derive(ToSchema)]
pub struct UpdateMemoResponseDoc { pub api: String, pub updated: bool }

#[derive(ToSchema)]
pub struct DeleteMemoResponseDoc { pub api: String, pub deleted: bool }

#[derive(ToSchema)]
pub struct ReadAllResponseDoc { pub api: String, pub memos: Vec<MemoDoc> }

/// `code` is one of UNKNOWN, INVALID_ARGUMENT, NOT_FOUND, UNIMPLEMENTED, DEADLINE_EXCEEDED.
#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub code: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::memos::create,
        crate::routes::memos::read,
        crate::routes::memos::update,
        crate::routes::memos::delete,
        crate::routes::memos::read_all,
    ),
    components(
        schemas(
            HealthResponse,
            TimestampDoc,
            MemoDoc,
            CreateMemoRequestDoc,
            CreateMemoResponseDoc,
            ReadMemoResponseDoc,
            UpdateMemoRequestDoc,
            UpdateMemoResponseDoc,
            DeleteMemoResponseDoc,
            ReadAllResponseDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "memo")
    )
)]
pub struct ApiDoc;
