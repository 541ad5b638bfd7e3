//! Server-rendered pages.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

use html_escape::{encode_double_quoted_attribute, encode_safe};

use tubescribe_core::domain::BlogPost;
use tubescribe_infra::extract_video_id;

fn layout(title: &str, username: Option<&str>, body: &str) -> String {
    let nav = match username {
        Some(name) => format!(
            r#"<nav><span>Welcome {}</span> <a href="/">New post</a> <a href="/blogs">Saved blog posts</a> <a href="/logout">Logout</a></nav>"#,
            encode_safe(name)
        ),
        None => r#"<nav><a href="/login">Login</a> <a href="/signup">Sign up</a></nav>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - TubeScribe</title>
</head>
<body>
<header><h1>TubeScribe</h1>{nav}</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = encode_safe(title),
    )
}

fn page(markup: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(markup)
}

fn error_block(error_message: Option<&str>) -> String {
    error_message
        .map(|msg| format!(r#"<p class="error">{}</p>"#, encode_safe(msg)))
        .unwrap_or_default()
}

/// Submission page. The script posts the link to `/generate` and shows the
/// returned article.
pub fn index(username: &str) -> HttpResponse {
    let body = r#"<section>
<h2>Generate a blog post from a YouTube video</h2>
<input id="youtubeLink" type="url" placeholder="Paste YouTube link...">
<button id="generateBlogButton" type="button">Generate</button>
<p id="loading" hidden>Generating...</p>
<article id="blogContent"></article>
</section>
<script>
document.getElementById("generateBlogButton").addEventListener("click", async () => {
  const link = document.getElementById("youtubeLink").value;
  const loading = document.getElementById("loading");
  const content = document.getElementById("blogContent");
  if (!link) { alert("Please enter a YouTube link."); return; }
  content.textContent = "";
  loading.hidden = false;
  try {
    const response = await fetch("/generate", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ link }),
    });
    const data = await response.json();
    content.textContent = response.ok ? data.content : data.error;
  } catch (e) {
    content.textContent = "Something went wrong. Please try again.";
  }
  loading.hidden = true;
});
</script>"#;

    page(layout("New post", Some(username), body))
}

pub fn login(error_message: Option<&str>) -> HttpResponse {
    let body = format!(
        r#"<h2>Login</h2>
{error}
<form method="post" action="/login">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Login</button>
</form>
<p>No account yet? <a href="/signup">Sign up</a></p>"#,
        error = error_block(error_message),
    );

    page(layout("Login", None, &body))
}

pub fn signup(error_message: Option<&str>) -> HttpResponse {
    let body = format!(
        r#"<h2>Sign up</h2>
{error}
<form method="post" action="/signup">
<label>Username <input name="username" required></label>
<label>Email <input name="email" type="email"></label>
<label>Password <input name="password" type="password" required></label>
<label>Repeat password <input name="repeatPassword" type="password" required></label>
<button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="/login">Login</a></p>"#,
        error = error_block(error_message),
    );

    page(layout("Sign up", None, &body))
}

/// The current user's posts, in the order given.
pub fn all_blogs(username: &str, posts: &[BlogPost]) -> HttpResponse {
    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                r#"<li><a href="/blogs/{id}"><h3>{title}</h3></a><p>{excerpt}</p><small>{created}</small></li>"#,
                id = post.id,
                title = encode_safe(&post.youtube_title),
                excerpt = encode_safe(&excerpt(&post.generated_content, 200)),
                created = post.created_at.format("%Y-%m-%d %H:%M"),
            )
        })
        .collect();

    let body = if posts.is_empty() {
        r#"<h2>Saved blog posts</h2><p>No posts yet. <a href="/">Generate one</a>.</p>"#.to_string()
    } else {
        format!("<h2>Saved blog posts</h2>\n<ul>{items}</ul>")
    };

    page(layout("Saved blog posts", Some(username), &body))
}

pub fn blog_details(username: &str, post: &BlogPost) -> HttpResponse {
    let paragraphs: String = post
        .generated_content
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p>{}</p>", encode_safe(p.trim())))
        .collect();

    let body = format!(
        r#"<article>
<h2>{title}</h2>
{source}
<small>{created}</small>
{paragraphs}
</article>"#,
        title = encode_safe(&post.youtube_title),
        source = source_link(&post.youtube_link),
        created = post.created_at.format("%Y-%m-%d %H:%M"),
    );

    page(layout(&post.youtube_title, Some(username), &body))
}

/// Link back to the video. Only the canonical watch URL is ever used as an
/// `href`; anything else is shown as plain text.
fn source_link(link: &str) -> String {
    match extract_video_id(link) {
        Some(id) => {
            let url = format!("https://www.youtube.com/watch?v={id}");
            format!(
                r#"<p><a href="{href}" rel="noopener noreferrer">{text}</a></p>"#,
                href = encode_double_quoted_attribute(&url),
                text = encode_safe(&url),
            )
        }
        None => format!("<p>{}</p>", encode_safe(link)),
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", text[..end].trim_end()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn post(link: &str, title: &str) -> BlogPost {
        tubescribe_core::domain::NewBlogPost::new(
            uuid::Uuid::new_v4(),
            title.to_string(),
            link.to_string(),
            "First paragraph.\n\nSecond <b>paragraph</b>.".to_string(),
        )
        .with_id(7)
    }

    async fn body(resp: HttpResponse) -> String {
        let bytes = actix_web::body::to_bytes(resp.into_body())
            .await
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[actix_rt::test]
    async fn test_detail_page_escapes_post_fields() {
        let page = body(blog_details(
            "alice",
            &post(LINK, r#"<script>alert("x")</script>"#),
        ))
        .await;

        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("Second &lt;b&gt;paragraph"));
    }

    #[actix_rt::test]
    async fn test_detail_page_links_canonical_watch_url() {
        let page = body(blog_details(
            "alice",
            &post("youtu.be/dQw4w9WgXcQ?t=42", "Talk"),
        ))
        .await;

        assert!(page.contains(r#"href="https://www.youtube.com/watch?v=dQw4w9WgXcQ""#));
    }

    #[actix_rt::test]
    async fn test_detail_page_never_links_script_urls() {
        let page = body(blog_details(
            "alice",
            &post(
                "javascript://www.youtube.com/watch?v=dQw4w9WgXcQ&x=%0Aalert(1)",
                "Talk",
            ),
        ))
        .await;

        assert!(!page.contains(r#"href="javascript"#));
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        assert_eq!(excerpt("héllo world", 5), "héllo...");
        assert_eq!(excerpt("short", 10), "short");
    }
}
