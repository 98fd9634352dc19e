/// All localized user-facing strings for a locale
///
/// Strings are stored raw. HTML output must go through `pages::escape_html`.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    // ==================== Page ====================
    /// Document title
    pub page_title: &'static str,

    /// Hero line under the couple's names
    pub hero_subtitle: &'static str,

    pub groom: &'static str,
    pub groom_name: &'static str,
    pub bride: &'static str,
    pub bride_name: &'static str,

    /// Invitation body text (newline separated)
    pub invitation_text: &'static str,

    /// Wedding date line
    pub wedding_date: &'static str,

    /// Countdown line
    /// Placeholders: {days}, {hours}, {minutes}, {seconds}
    pub countdown: &'static str,

    /// Shown once the wedding date has passed
    pub countdown_passed: &'static str,

    // ==================== RSVP ====================
    pub rsvp_title: &'static str,
    pub rsvp_guide: &'static str,
    pub rsvp_name: &'static str,
    pub rsvp_phone: &'static str,
    pub rsvp_email: &'static str,
    pub attendance_yes: &'static str,
    pub attendance_no: &'static str,

    /// Guest count option label
    /// Placeholders: {count}
    pub rsvp_guests_option: &'static str,

    /// Guest count option label for zero
    pub rsvp_guests_zero: &'static str,

    pub rsvp_message: &'static str,
    pub rsvp_btn_send: &'static str,
    pub rsvp_btn_submitting: &'static str,

    // ==================== RSVP Feedback ====================
    /// Field error for a missing name or attendance
    pub rsvp_required: &'static str,

    /// Field error for an invalid email
    pub rsvp_error_email: &'static str,

    /// Field error for an invalid phone number
    pub rsvp_error_phone: &'static str,

    /// Field error for a guest count outside 0-10
    pub rsvp_error_guests: &'static str,

    /// Confirmation shown after a successful submission
    pub rsvp_success: &'static str,

    /// Generic failure notice (underlying errors are never shown)
    pub rsvp_error: &'static str,
}

impl LocaleStrings {
    /// Label for a guest count option on the RSVP form
    pub fn guests_label(&self, count: u8) -> String {
        if count == 0 {
            self.rsvp_guests_zero.to_string()
        } else {
            self.rsvp_guests_option.replace("{count}", &count.to_string())
        }
    }
}

// ==================== Korean Strings ====================

/// Korean strings (fallback locale)
pub const KOREAN_STRINGS: LocaleStrings = LocaleStrings {
    page_title: "최인회 & 가츠오 레이코 결혼식에 초대합니다",
    hero_subtitle: "저희 두 사람, 결혼합니다",
    groom: "신랑",
    groom_name: "최인회",
    bride: "신부",
    bride_name: "가츠오 레이코",
    invitation_text: "서로 다른 두 나라에서 자란 저희가\n\
하나의 길을 함께 걷고자 합니다.\n\
귀한 걸음 하시어 축복해 주시면\n\
더없는 기쁨으로 간직하겠습니다.",
    wedding_date: "2026년 11월 28일 토요일 오후 1시 40분",
    countdown: "결혼식까지 {days}일 {hours}시간 {minutes}분 {seconds}초",
    countdown_passed: "저희 결혼식에 함께해 주셔서 감사합니다",

    rsvp_title: "참석 여부 전달",
    rsvp_guide: "원활한 준비를 위해\n참석 여부를 미리 알려주세요.",
    rsvp_name: "성함",
    rsvp_phone: "연락처",
    rsvp_email: "이메일",
    attendance_yes: "참석합니다",
    attendance_no: "참석이 어렵습니다",
    rsvp_guests_option: "동반 {count}명",
    rsvp_guests_zero: "동반 없음",
    rsvp_message: "전하실 말씀",
    rsvp_btn_send: "전달하기",
    rsvp_btn_submitting: "전송 중...",

    rsvp_required: "필수 항목입니다",
    rsvp_error_email: "올바른 이메일 주소를 입력해 주세요",
    rsvp_error_phone: "올바른 연락처를 입력해 주세요",
    rsvp_error_guests: "동반 인원은 0명에서 10명 사이로 선택해 주세요",
    rsvp_success: "소중한 답변 감사합니다!",
    rsvp_error: "전송에 실패했습니다. 잠시 후 다시 시도해 주세요.",
};

// ==================== Japanese Strings ====================

/// Japanese strings
pub const JAPANESE_STRINGS: LocaleStrings = LocaleStrings {
    page_title: "チェ・インフェ & カツオ・レイコ 結婚式のご案内",
    hero_subtitle: "私たち、結婚します",
    groom: "新郎",
    groom_name: "チェ・インフェ",
    bride: "新婦",
    bride_name: "カツオ・レイコ",
    invitation_text: "異なる二つの国で育った私たちが\n\
同じ道を共に歩むことになりました。\n\
ご多用中とは存じますが\n\
ぜひご出席いただけますと幸いです。",
    wedding_date: "2026年11月28日（土）午後1時40分",
    countdown: "結婚式まで あと{days}日 {hours}時間 {minutes}分 {seconds}秒",
    countdown_passed: "ご出席いただき、ありがとうございました",

    rsvp_title: "ご出欠のご回答",
    rsvp_guide: "準備の都合上\nご出欠を事前にお知らせください。",
    rsvp_name: "お名前",
    rsvp_phone: "電話番号",
    rsvp_email: "メールアドレス",
    attendance_yes: "出席します",
    attendance_no: "欠席します",
    rsvp_guests_option: "同伴者 {count}名",
    rsvp_guests_zero: "同伴者なし",
    rsvp_message: "メッセージ",
    rsvp_btn_send: "送信する",
    rsvp_btn_submitting: "送信中...",

    rsvp_required: "必須項目です",
    rsvp_error_email: "正しいメールアドレスを入力してください",
    rsvp_error_phone: "正しい電話番号を入力してください",
    rsvp_error_guests: "同伴者数は0〜10名の範囲で選択してください",
    rsvp_success: "ご回答ありがとうございます！",
    rsvp_error: "送信に失敗しました。しばらくしてから再度お試しください。",
};
