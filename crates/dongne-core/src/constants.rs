// --- Address search ---

/// Number of candidates shown per result page.
pub const PAGE_SIZE: usize = 10;

/// Number of leading region tokens kept from a full address (시·도, 시·군·구, 동).
pub const REGION_TOKEN_COUNT: usize = 3;

/// Suffix marking a neighbourhood-level region token.
pub const NEIGHBORHOOD_MARKER: char = '동';

// --- Object storage ---

/// Bucket holding post thumbnails.
pub const POST_IMAGES_BUCKET: &str = "post-images";

/// Bucket holding chat room covers and message attachments.
pub const CHAT_IMAGES_BUCKET: &str = "chat-images";

pub const THUMBNAIL_PREFIX: &str = "thumbnail";
pub const MESSAGE_IMAGE_PREFIX: &str = "messages";
pub const ROOM_IMAGE_PREFIX: &str = "rooms";

/// Cache-Control recorded for uploaded thumbnails.
pub const THUMBNAIL_CACHE_CONTROL: &str = "max-age=3600";

/// Extension used when an uploaded thumbnail's file name has none.
pub const DEFAULT_THUMBNAIL_EXTENSION: &str = "png";

/// Cover image for rooms created without one.
pub const DEFAULT_ROOM_IMAGE: &str = "/images/default_room.png";

// --- Feeds ---

/// Maximum number of posts loaded into the feed.
pub const POST_FEED_LIMIT: i64 = 100;

// --- User-facing messages ---

pub const MSG_NO_RESULTS: &str = "검색 결과가 없습니다.";
pub const MSG_SEARCH_FAILED: &str = "검색 중 오류가 발생했습니다.";
pub const MSG_LOCATION_DENIED: &str = "위치 권한이 거부되었습니다.";
pub const MSG_LOCATION_UNAVAILABLE: &str = "Geolocation을 지원하지 않는 브라우저입니다.";
pub const MSG_ADDRESS_NOT_FOUND: &str = "주소 정보 없음";
pub const MSG_LOOKUP_FAILED: &str = "주소 조회 실패";
pub const MSG_INCOMPLETE_DRAFT: &str = "모든 항목을 입력해주세요.";
pub const MSG_LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
pub const MSG_UPLOAD_FAILED: &str = "이미지 업로드 실패";
pub const MSG_SAVE_FAILED: &str = "저장 실패";
pub const MSG_ROOM_NOT_FOUND: &str = "채팅방을 찾을 수 없습니다.";
