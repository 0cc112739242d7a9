//! Lua scripts executed atomically by Redis.
//!
//! Every key a script touches is passed in `KEYS`. The keys of one script
//! still live in different hash slots, so the store needs a single Redis
//! node rather than a cluster.

/// Capacity-checked append.
///
/// KEYS[1] = reservation list for the resource and day
/// KEYS[2] = id -> list key index
/// KEYS[3] = set of list keys
/// ARGV[1] = requested window start (minutes from midnight)
/// ARGV[2] = requested window end
/// ARGV[3] = stock
/// ARGV[4] = reservation document (JSON)
/// ARGV[5] = reservation id
/// ARGV[6] = longest stored duration that still counts
///
/// Returns `{appended, overlapping}` where `appended` is 1 or 0.
pub(crate) const APPEND_WITHIN_CAPACITY: &str = r#"
    local list_key = KEYS[1]
    local index_key = KEYS[2]
    local lists_key = KEYS[3]
    local start = tonumber(ARGV[1])
    local finish = tonumber(ARGV[2])
    local stock = tonumber(ARGV[3])
    local max_duration = tonumber(ARGV[6])

    local overlapping = 0
    for _, raw in ipairs(redis.call('LRANGE', list_key, 0, -1)) do
        local ok, doc = pcall(cjson.decode, raw)
        if ok and type(doc) == 'table'
            and type(doc.time) == 'string'
            and type(doc.durationMinutes) == 'number' then
            local h, m = string.match(doc.time, '^(%d%d):(%d%d)$')
            local duration = doc.durationMinutes
            if h and duration > 0 and duration <= max_duration
                and math.floor(duration) == duration then
                h = tonumber(h)
                m = tonumber(m)
                if h < 24 and m < 60 then
                    local s = h * 60 + m
                    local e = s + duration
                    if start < e and s < finish then
                        overlapping = overlapping + 1
                    end
                end
            end
        end
    end

    if overlapping >= stock then
        return {0, overlapping}
    end

    redis.call('RPUSH', list_key, ARGV[4])
    redis.call('HSET', index_key, ARGV[5], list_key)
    redis.call('SADD', lists_key, list_key)
    return {1, overlapping}
"#;

/// Delete a reservation by id from the list the caller resolved.
///
/// KEYS[1] = id -> list key index
/// KEYS[2] = reservation list the index pointed at
/// ARGV[1] = reservation id
///
/// Returns 1 if a document was removed, 0 otherwise. Nothing changes when
/// the index no longer points at KEYS[2].
pub(crate) const DELETE_BY_ID: &str = r#"
    local index_key = KEYS[1]
    local list_key = KEYS[2]
    local id = ARGV[1]

    if redis.call('HGET', index_key, id) ~= list_key then
        return 0
    end

    local removed = 0
    for _, raw in ipairs(redis.call('LRANGE', list_key, 0, -1)) do
        local ok, doc = pcall(cjson.decode, raw)
        if ok and type(doc) == 'table' and doc.id == id then
            removed = redis.call('LREM', list_key, 1, raw)
            break
        end
    end

    redis.call('HDEL', index_key, id)
    if removed > 0 then
        return 1
    end
    return 0
"#;
