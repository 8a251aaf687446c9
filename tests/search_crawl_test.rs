use naver_extract::{parse_search_results, ExtractOptions, SelectorRegistry};

fn registry() -> SelectorRegistry {
    SelectorRegistry::default()
}

fn options() -> ExtractOptions {
    ExtractOptions::default()
}

#[test]
fn listing_items_are_parsed_with_all_fields() {
    let html = r#"
        <ul class="lst_total">
          <li class="bx">
            <a class="api_txt_lines total_tit" href="https://blog.naver.com/kimchi/223100">김치찌개 황금 레시피</a>
            <a class="api_txt_lines dsc_txt">멸치 육수부터 시작하는 기본기</a>
            <a class="sub_txt sub_name" href="https://blog.naver.com/kimchi">집밥연구소</a>
            <span class="sub_time">3일 전</span>
            <img class="thumb" src="https://search.pstatic.net/thumb1.jpg">
          </li>
        </ul>
    "#;

    let items = parse_search_results(html, &registry(), &options());
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.title, "김치찌개 황금 레시피");
    assert_eq!(item.link, "https://blog.naver.com/kimchi/223100");
    assert_eq!(item.description, "멸치 육수부터 시작하는 기본기");
    assert_eq!(item.blog_name, "집밥연구소");
    assert_eq!(item.date, "3일 전");
    assert_eq!(item.thumbnail, "https://search.pstatic.net/thumb1.jpg");
}

#[test]
fn ad_redirect_links_are_never_emitted() {
    let html = r#"
        <ul class="lst_total">
          <li class="bx">
            <a class="api_txt_lines total_tit"
               href="https://ader.naver.com/v1/click?u=https://blog.naver.com/ad/1">광고 글입니다</a>
          </li>
          <li class="bx">
            <a class="api_txt_lines total_tit" href="https://blog.naver.com/real/2">진짜 글입니다</a>
          </li>
        </ul>
    "#;

    let items = parse_search_results(html, &registry(), &options());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].link, "https://blog.naver.com/real/2");
}

#[test]
fn blog_links_without_post_segment_are_rejected() {
    let html = r#"
        <ul class="lst_total">
          <li class="bx">
            <a class="api_txt_lines total_tit" href="https://blog.naver.com/homeonly">블로그 홈 링크</a>
          </li>
          <li class="bx">
            <a class="api_txt_lines total_tit" href="https://blog.naver.com/writer/223200">정상적인 포스트</a>
          </li>
        </ul>
    "#;

    let items = parse_search_results(html, &registry(), &options());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].link, "https://blog.naver.com/writer/223200");
}

#[test]
fn consecutive_same_blog_results_are_collapsed() {
    let html = r#"
        <ul class="lst_total">
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/aaa/1">같은 블로그 첫 글</a></li>
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/aaa/2">같은 블로그 둘째 글</a></li>
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/bbb/3">다른 블로그 글</a></li>
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/aaa/4">같은 블로그 재등장</a></li>
        </ul>
    "#;

    let items = parse_search_results(html, &registry(), &options());
    let links: Vec<&str> = items.iter().map(|item| item.link.as_str()).collect();
    assert_eq!(
        links,
        [
            "https://blog.naver.com/aaa/1",
            "https://blog.naver.com/bbb/3",
            "https://blog.naver.com/aaa/4",
        ]
    );
}

#[test]
fn collapse_can_be_disabled() {
    let html = r#"
        <ul class="lst_total">
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/aaa/1">한 블로그에서 검색 첫 글</a></li>
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/aaa/2">한 블로그에서 검색 둘째 글</a></li>
        </ul>
    "#;

    let options = ExtractOptions {
        collapse_consecutive: false,
        ..ExtractOptions::default()
    };
    let items = parse_search_results(html, &registry(), &options);
    assert_eq!(items.len(), 2);
}

#[test]
fn duplicate_links_keep_first_occurrence() {
    let html = r#"
        <ul class="lst_total">
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/aaa/1">처음 등장한 글</a></li>
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/bbb/2">중간의 다른 글</a></li>
          <li class="bx"><a class="api_txt_lines total_tit" href="https://blog.naver.com/aaa/1">다시 등장한 같은 글</a></li>
        </ul>
    "#;

    let items = parse_search_results(html, &registry(), &options());
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "처음 등장한 글");
}

#[test]
fn anchor_scan_fallback_handles_unknown_markup() {
    let html = r#"
        <div class="totally-new-skin">
          <li>
            <a href="https://blog.naver.com/fresh/223300">완전히 새로운 마크업의 포스트 제목</a>
            <span>리스트 요소 안에 설명 텍스트가 함께 있습니다</span>
          </li>
          <a href="https://blog.naver.com/short/1">짧음</a>
        </div>
    "#;

    let items = parse_search_results(html, &registry(), &options());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].link, "https://blog.naver.com/fresh/223300");
    assert!(items[0].description.contains("설명 텍스트"));
}
